//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::DrafterConfig;

/// Validate configuration
///
/// A missing body template is a caller programming error and fails loudly;
/// everything else in the drafter degrades to documented defaults.
pub fn validate_config(config: &DrafterConfig) -> Result<()> {
    debug!("validating configuration");
    validate_templates(config)?;
    validate_categories(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_templates(config: &DrafterConfig) -> Result<()> {
    if config.template.is_empty() {
        return Err(ConfigError::MissingField("template".to_string()).into());
    }

    if config.change_template.is_empty() {
        return Err(ConfigError::MissingField("change-template".to_string()).into());
    }

    if config.version_template.is_empty() {
        return Err(ConfigError::MissingField("version-template".to_string()).into());
    }

    Ok(())
}

fn validate_categories(config: &DrafterConfig) -> Result<()> {
    for (index, category) in config.categories.iter().enumerate() {
        if category.title.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("categories[{}].title", index),
                message: "title cannot be empty".to_string(),
            }
            .into());
        }

        if category.commit_types.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("categories[{}].commit-types", index),
                message: "must list at least one commit type".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CategoryConfig;

    #[test]
    fn test_validate_default_config() {
        let config = DrafterConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_body_template() {
        let config = DrafterConfig {
            template: String::new(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_untitled_category() {
        let config = DrafterConfig {
            categories: vec![CategoryConfig::new("", &["feat"])],
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_category_without_types() {
        let config = DrafterConfig {
            categories: vec![CategoryConfig::new("Features", &[])],
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
