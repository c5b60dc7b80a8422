//! Resolved-version precedence
//!
//! Consolidates the competing "resolved version" sources (explicit
//! override, existing draft, computed bump) into one precedence function.

use tracing::{debug, instrument};

use gantry_core::template::Variables;
use gantry_core::types::BumpLevel;

use crate::coerce::coerce_version;
use crate::points::{next_major, next_minor, next_patch, next_prerelease, VersionPoint};

/// Default resolved version for a repository with no history
pub const FIRST_RELEASE: &str = "0.1.0";

/// Inputs to version resolution
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    /// Tag of the prior published release
    pub prior_tag: Option<&'a str>,
    /// Explicitly supplied version override
    pub override_version: Option<&'a str>,
    /// Tag of an existing draft release
    pub draft_tag: Option<&'a str>,
    /// Bump level derived from the change set
    pub bump: BumpLevel,
    /// An explicit prerelease increment was requested
    pub prerelease_increment: bool,
    /// Template used to format every point
    pub version_template: &'a str,
    /// Prerelease identifier (e.g. `rc`)
    pub prerelease_identifier: &'a str,
    /// Tag prefix stripped during coercion
    pub tag_prefix: &'a str,
}

/// Every named version point produced by resolution
#[derive(Debug, Clone)]
pub struct ResolvedVersions {
    /// Next major version from the prior release
    pub next_major: VersionPoint,
    /// Next minor version from the prior release
    pub next_minor: VersionPoint,
    /// Next patch version from the prior release
    pub next_patch: VersionPoint,
    /// Next prerelease version from the prior release
    pub next_prerelease: VersionPoint,
    /// The explicit override, when supplied and parsable
    pub input: Option<VersionPoint>,
    /// The final resolved version
    pub resolved: VersionPoint,
}

/// Resolve every version point and the final version
///
/// Precedence for the resolved version, highest first:
/// 1. an explicit override carrying a prerelease tag wins outright;
/// 2. otherwise a draft version carrying a prerelease tag is preserved
///    verbatim (prerelease identifiers are never silently advanced);
/// 3. otherwise the bump policy applied to the prior version (or
///    [`FIRST_RELEASE`] when no prior version exists);
/// 4. floor comparison: an override strictly greater than the computed
///    version wins; failing that, a draft strictly greater than the
///    computed version wins. Floors never act as ceilings, and an
///    override below the computed version is silently ignored.
#[instrument(skip(request), fields(prior = ?request.prior_tag, bump = %request.bump))]
pub fn resolve(request: &ResolveRequest) -> ResolvedVersions {
    let prefix = request.tag_prefix;
    let prior = request.prior_tag.and_then(|tag| coerce_version(tag, prefix));
    let override_version = request
        .override_version
        .and_then(|raw| coerce_version(raw, prefix));
    let draft = request.draft_tag.and_then(|tag| coerce_version(tag, prefix));

    let base = prior.clone().unwrap_or_else(|| semver::Version::new(0, 0, 0));
    let identifier = request.prerelease_identifier;

    let computed = match &prior {
        Some(prior_version) => {
            if request.prerelease_increment {
                next_prerelease(prior_version, identifier)
            } else {
                match request.bump {
                    BumpLevel::Major => next_major(prior_version),
                    BumpLevel::Minor => next_minor(prior_version),
                    BumpLevel::Patch => next_patch(prior_version),
                }
            }
        }
        None => first_release(request.prerelease_increment, identifier),
    };

    let resolved = if let Some(explicit) = &override_version {
        if !explicit.pre.is_empty() {
            explicit.clone()
        } else if *explicit > computed {
            explicit.clone()
        } else {
            computed.clone()
        }
    } else if let Some(draft_version) = &draft {
        if !draft_version.pre.is_empty() {
            draft_version.clone()
        } else if *draft_version > computed {
            draft_version.clone()
        } else {
            computed.clone()
        }
    } else {
        computed.clone()
    };

    debug!(computed = %computed, resolved = %resolved, "version resolved");

    let template = request.version_template;
    ResolvedVersions {
        next_major: VersionPoint::from_version(&next_major(&base), template),
        next_minor: VersionPoint::from_version(&next_minor(&base), template),
        next_patch: VersionPoint::from_version(&next_patch(&base), template),
        next_prerelease: VersionPoint::from_version(&next_prerelease(&base, identifier), template),
        input: override_version
            .as_ref()
            .map(|v| VersionPoint::from_version(v, template)),
        resolved: VersionPoint::from_version(&resolved, template),
    }
}

fn first_release(prerelease_increment: bool, identifier: &str) -> semver::Version {
    let mut version = semver::Version::parse(FIRST_RELEASE).expect("static version");
    if prerelease_increment {
        version.pre =
            semver::Prerelease::new(&format!("{}.0", identifier)).unwrap_or_default();
    }
    version
}

impl ResolvedVersions {
    /// The stable template variable surface for all version points
    ///
    /// For every point name the bare variable renders the point through
    /// its template, and `_MAJOR`/`_MINOR`/`_PATCH` variants expose the
    /// single fields. Absent points substitute as empty strings.
    pub fn template_variables(&self) -> Variables {
        let mut variables = Variables::new();
        let points: [(&str, Option<&VersionPoint>); 6] = [
            ("NEXT_MAJOR_VERSION", Some(&self.next_major)),
            ("NEXT_MINOR_VERSION", Some(&self.next_minor)),
            ("NEXT_PATCH_VERSION", Some(&self.next_patch)),
            ("NEXT_PRERELEASE_VERSION", Some(&self.next_prerelease)),
            ("INPUT_VERSION", self.input.as_ref()),
            ("RESOLVED_VERSION", Some(&self.resolved)),
        ];

        for (name, point) in points {
            match point {
                Some(point) => {
                    variables
                        .set(name.to_string(), point.render())
                        .set(format!("{}_MAJOR", name), point.major.to_string())
                        .set(format!("{}_MINOR", name), point.minor.to_string())
                        .set(format!("{}_PATCH", name), point.patch.to_string());
                }
                None => {
                    variables
                        .set(name.to_string(), "")
                        .set(format!("{}_MAJOR", name), "")
                        .set(format!("{}_MINOR", name), "")
                        .set(format!("{}_PATCH", name), "");
                }
            }
        }

        variables
    }
}
