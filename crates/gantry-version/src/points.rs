//! Version points
//!
//! A version point is a candidate version (next-major, next-minor, ...)
//! together with its structural decomposition and the template used to
//! format it.

use serde::{Deserialize, Serialize};

use gantry_core::template::{render, Variables};

/// A resolved version and its structural decomposition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionPoint {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
    /// Prerelease suffix, without the leading `-`
    pub prerelease: Option<String>,
    /// Complete version string
    pub complete: String,
    /// Template used to format this point
    pub template: String,
}

impl VersionPoint {
    /// Build a point from a parsed version
    pub fn from_version(version: &semver::Version, template: impl Into<String>) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            prerelease: if version.pre.is_empty() {
                None
            } else {
                Some(version.pre.to_string())
            },
            complete: version.to_string(),
            template: template.into(),
        }
    }

    /// Render the point through its template
    ///
    /// `$PRERELEASE` carries its leading `-` (empty when absent) so the
    /// default template `$MAJOR.$MINOR.$PATCH$PRERELEASE` reproduces the
    /// complete version.
    pub fn render(&self) -> String {
        let mut variables = Variables::new();
        variables
            .set("MAJOR", self.major.to_string())
            .set("MINOR", self.minor.to_string())
            .set("PATCH", self.patch.to_string())
            .set(
                "PRERELEASE",
                self.prerelease
                    .as_deref()
                    .map(|pre| format!("-{}", pre))
                    .unwrap_or_default(),
            )
            .set("COMPLETE", self.complete.clone());
        render(&self.template, &variables)
    }

    /// The parsed semantic version this point denotes
    pub fn to_version(&self) -> semver::Version {
        let mut version = semver::Version::new(self.major, self.minor, self.patch);
        if let Some(pre) = &self.prerelease {
            version.pre = semver::Prerelease::new(pre).unwrap_or_default();
        }
        version
    }
}

/// Next major version, lower components reset
pub fn next_major(version: &semver::Version) -> semver::Version {
    semver::Version::new(version.major + 1, 0, 0)
}

/// Next minor version, patch reset
pub fn next_minor(version: &semver::Version) -> semver::Version {
    semver::Version::new(version.major, version.minor + 1, 0)
}

/// Next patch version
pub fn next_patch(version: &semver::Version) -> semver::Version {
    semver::Version::new(version.major, version.minor, version.patch + 1)
}

/// Next prerelease version for the given identifier
///
/// A release version moves to the next patch with an initialized counter
/// (`1.0.0` → `1.0.1-rc.0`); an existing prerelease with the same
/// identifier increments its counter (`1.0.1-rc.0` → `1.0.1-rc.1`); a
/// different identifier restarts the counter at the same base
/// (`1.0.1-beta.2` → `1.0.1-rc.0`).
pub fn next_prerelease(version: &semver::Version, identifier: &str) -> semver::Version {
    let mut next = if version.pre.is_empty() {
        next_patch(version)
    } else {
        semver::Version::new(version.major, version.minor, version.patch)
    };

    let pre = if version.pre.is_empty() {
        format!("{}.0", identifier)
    } else {
        increment_prerelease(version.pre.as_str(), identifier)
    };

    next.pre = semver::Prerelease::new(&pre).unwrap_or_default();
    next
}

fn increment_prerelease(current: &str, identifier: &str) -> String {
    if let Some((head, counter)) = current.rsplit_once('.') {
        if head == identifier {
            if let Ok(n) = counter.parse::<u64>() {
                return format!("{}.{}", identifier, n + 1);
            }
        }
    }
    format!("{}.0", identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> semver::Version {
        semver::Version::parse(s).unwrap()
    }

    #[test]
    fn test_increments_reset_lower_components() {
        assert_eq!(next_major(&v("1.2.3")), v("2.0.0"));
        assert_eq!(next_minor(&v("1.2.3")), v("1.3.0"));
        assert_eq!(next_patch(&v("1.2.3")), v("1.2.4"));
    }

    #[test]
    fn test_increments_drop_prerelease() {
        assert_eq!(next_major(&v("1.2.3-rc.1")), v("2.0.0"));
        assert_eq!(next_minor(&v("1.2.3-rc.1")), v("1.3.0"));
    }

    #[test]
    fn test_next_prerelease_initializes_counter() {
        assert_eq!(next_prerelease(&v("1.0.0"), "rc"), v("1.0.1-rc.0"));
    }

    #[test]
    fn test_next_prerelease_increments_counter() {
        assert_eq!(next_prerelease(&v("1.0.1-rc.0"), "rc"), v("1.0.1-rc.1"));
        assert_eq!(next_prerelease(&v("2.0.0-rc.9"), "rc"), v("2.0.0-rc.10"));
    }

    #[test]
    fn test_next_prerelease_switches_identifier() {
        assert_eq!(next_prerelease(&v("1.0.1-beta.2"), "rc"), v("1.0.1-rc.0"));
    }

    #[test]
    fn test_point_render_default_template() {
        let point = VersionPoint::from_version(&v("1.2.3"), "$MAJOR.$MINOR.$PATCH$PRERELEASE");
        assert_eq!(point.render(), "1.2.3");

        let point = VersionPoint::from_version(&v("2.0.0-rc.1"), "$MAJOR.$MINOR.$PATCH$PRERELEASE");
        assert_eq!(point.render(), "2.0.0-rc.1");
    }

    #[test]
    fn test_point_render_complete() {
        let point = VersionPoint::from_version(&v("2.0.0-rc.1"), "$COMPLETE");
        assert_eq!(point.render(), "2.0.0-rc.1");
    }

    #[test]
    fn test_point_round_trips_to_version() {
        let original = v("3.1.4-rc.2");
        let point = VersionPoint::from_version(&original, "$COMPLETE");
        assert_eq!(point.to_version(), original);
    }
}
