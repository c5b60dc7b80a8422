//! Version coercion from tag-like strings

use regex::Regex;
use std::sync::LazyLock;

/// Best-effort `MAJOR.MINOR.PATCH` extraction
static LOOSE_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)").expect("Invalid regex")
});

/// Leading major digit of a tag, after an optional `v`
static TAG_MAJOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?(?P<major>\d+)").expect("Invalid regex"));

/// Coerce a tag-like string into a semantic version
///
/// The configured tag prefix is stripped first, then a strict semver parse
/// is attempted; failing that, a best-effort extraction of the leading
/// `MAJOR.MINOR.PATCH` triple. Unparsable input yields `None`, which
/// callers must treat as a valid, common state (fresh repositories).
pub fn coerce_version(raw: &str, tag_prefix: &str) -> Option<semver::Version> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let stripped = if !tag_prefix.is_empty() {
        trimmed.strip_prefix(tag_prefix).unwrap_or(trimmed)
    } else {
        trimmed
    };
    let stripped = stripped.strip_prefix('v').unwrap_or(stripped);

    if let Ok(version) = semver::Version::parse(stripped) {
        return Some(version);
    }

    let caps = LOOSE_VERSION_REGEX.captures(stripped)?;
    Some(semver::Version::new(
        caps["major"].parse().ok()?,
        caps["minor"].parse().ok()?,
        caps["patch"].parse().ok()?,
    ))
}

/// Extract the major version digit from a release tag
pub fn major_from_tag(tag: &str) -> Option<u64> {
    let caps = TAG_MAJOR_REGEX.captures(tag.trim())?;
    caps["major"].parse().ok()
}
