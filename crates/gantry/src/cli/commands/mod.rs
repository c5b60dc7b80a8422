//! CLI commands

mod completions;
mod draft;
mod init;
mod validate;
mod version;

pub use completions::CompletionsCommand;
pub use draft::DraftCommand;
pub use init::InitCommand;
pub use validate::ValidateCommand;
pub use version::VersionCommand;
