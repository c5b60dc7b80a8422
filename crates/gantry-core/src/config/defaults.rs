//! Default configuration values

use super::types::DrafterConfig;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gantry.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gantry.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".gantry.yaml";

/// Default tag prefix
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Default release body template
pub const DEFAULT_BODY_TEMPLATE: &str = "## What's Changed\n\n$CHANGES\n";

/// Default template for a single change line
pub const DEFAULT_CHANGE_TEMPLATE: &str = "* $TITLE (#$NUMBER) @$AUTHOR";

/// Default template for a category header
pub const DEFAULT_CATEGORY_TEMPLATE: &str = "## $TITLE";

/// Default body when no semantic changes were found
pub const DEFAULT_NO_CHANGES_TEMPLATE: &str = "* No changes";

/// Default version point template
pub const DEFAULT_VERSION_TEMPLATE: &str = "$MAJOR.$MINOR.$PATCH$PRERELEASE";

/// Default prerelease identifier
pub const DEFAULT_PRERELEASE_IDENTIFIER: &str = "rc";

/// Default contributors sentence when nobody qualifies
pub const DEFAULT_NO_CONTRIBUTORS_TEMPLATE: &str = "No contributors";

/// Author handle substituted when a change has no known author
pub const GHOST_AUTHOR: &str = "ghost";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".gantry.toml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    let config = DrafterConfig::default();
    serde_yaml::to_string(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r###"# Gantry Configuration
# See https://github.com/example/gantry for documentation

tag-prefix: "v"

template: |
  ## What's Changed

  $CHANGES

change-template: "* $TITLE (#$NUMBER) @$AUTHOR"
no-changes-template: "* No changes"
category-template: "## $TITLE"

categories:
  - title: "Breaking Changes"
    commit-types: [breaking]
  - title: "Features"
    commit-types: [feat]
  - title: "Bug Fixes"
    commit-types: [fix, revert]
  - title: "Maintenance"
    commit-types: [docs, style, refactor, perf, test, build, ci, chore]
    collapse-after: 5

version-resolver:
  default: patch
  pre-one-zero-minor-for-breaking: true
  no-auto-major: true
"###;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_names() {
        let names = config_file_names();
        assert!(names.contains(&"gantry.yaml"));
        assert!(names.contains(&".gantry.toml"));
    }

    #[test]
    fn test_default_config_yaml_round_trips() {
        let yaml = default_config_yaml();
        let parsed: DrafterConfig = serde_yaml::from_str(&yaml).unwrap();
        assert!(!parsed.template.is_empty());
    }

    #[test]
    fn test_default_config_template_parses() {
        let parsed: DrafterConfig = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed.categories.len(), 4);
        assert_eq!(parsed.categories[3].collapse_after, 5);
    }
}
