//! Gantry Core - Core library for release drafting
//!
//! This crate provides the foundational types, error handling, configuration,
//! and template rendering for the Gantry release drafting tool.

pub mod config;
pub mod error;
pub mod template;
pub mod types;

pub use config::{load_config, load_config_or_default, DrafterConfig};
pub use error::{GantryError, Result};
pub use template::{apply_replacers, render, Replacer, Variables};
pub use types::BumpLevel;
