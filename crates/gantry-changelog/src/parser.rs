//! Conventional commit-line parser
//!
//! Parses commit messages following the Conventional Commits specification:
//! https://www.conventionalcommits.org/
//!
//! Every non-blank line of a message is considered independently, so a
//! squash-merge body with several conventional lines yields several
//! records.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ChangeType;

/// Regex for a conventional commit line
static LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?:\s+(?P<description>.+)$",
    )
    .expect("Invalid regex")
});

/// Regex for a trailing inline PR reference
static PR_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(#(?P<number>\d+)\)\s*$").expect("Invalid regex"));

/// Marker broadcasting the breaking flag to every line of a message
const BREAKING_MARKER: &str = "BREAKING CHANGE:";

/// One accepted line of a commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Commit type
    pub change_type: ChangeType,
    /// Scope qualifier, if present
    pub scope: Option<String>,
    /// Whether the line is a breaking change
    pub breaking: bool,
    /// Description with any inline PR reference stripped
    pub description: String,
    /// Inline PR reference number, if present
    pub pr_number: Option<u64>,
}

/// Parse a commit message into its accepted conventional lines
///
/// Lines that fail the pattern, or whose type is not in the closed
/// vocabulary, are silently skipped. A `BREAKING CHANGE:` marker anywhere
/// in the message marks every accepted line breaking, including lines
/// without a local `!` marker.
pub fn parse_message(message: &str) -> Vec<ParsedLine> {
    if message.is_empty() {
        return Vec::new();
    }

    let message_breaking = message.contains(BREAKING_MARKER);

    message
        .lines()
        .filter_map(|line| parse_line(line.trim(), message_breaking))
        .collect()
}

fn parse_line(line: &str, message_breaking: bool) -> Option<ParsedLine> {
    if line.is_empty() {
        return None;
    }

    let caps = LINE_REGEX.captures(line)?;
    let change_type: ChangeType = caps["type"].to_lowercase().parse().ok()?;
    let scope = caps.name("scope").map(|m| m.as_str().to_string());
    let local_breaking = caps.name("breaking").is_some();

    let raw_description = caps["description"].trim();
    let pr_number = PR_REF_REGEX
        .captures(raw_description)
        .and_then(|c| c["number"].parse::<u64>().ok());
    let description = PR_REF_REGEX
        .replace(raw_description, "")
        .trim()
        .to_string();

    Some(ParsedLine {
        change_type,
        scope,
        breaking: local_breaking || message_breaking,
        description,
        pr_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_feat() {
        let lines = parse_message("feat: add new feature");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].change_type, ChangeType::Feat);
        assert_eq!(lines[0].description, "add new feature");
        assert!(lines[0].scope.is_none());
        assert!(!lines[0].breaking);
    }

    #[test]
    fn test_parse_with_scope() {
        let lines = parse_message("fix(parser): handle edge case");
        assert_eq!(lines[0].scope, Some("parser".to_string()));
        assert_eq!(lines[0].description, "handle edge case");
    }

    #[test]
    fn test_parse_breaking_marker() {
        let lines = parse_message("refactor(core)!: major refactoring");
        assert!(lines[0].breaking);
    }

    #[test]
    fn test_parse_strips_inline_pr_reference() {
        let lines = parse_message("feat: add widgets (#123)");
        assert_eq!(lines[0].description, "add widgets");
        assert_eq!(lines[0].pr_number, Some(123));
    }

    #[test]
    fn test_parse_empty_message() {
        assert!(parse_message("").is_empty());
    }

    #[test]
    fn test_parse_non_conventional_line_skipped() {
        assert!(parse_message("Just a regular commit message").is_empty());
        assert!(parse_message("feat:missing space").is_empty());
    }

    #[test]
    fn test_parse_unrecognized_type_skipped() {
        assert!(parse_message("wip: half-done thing").is_empty());
    }

    #[test]
    fn test_parse_multiple_lines() {
        let message = "feat: add login flow\n\nfix: resolve startup crash\nnot conventional";
        let lines = parse_message(message);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].change_type, ChangeType::Feat);
        assert_eq!(lines[1].change_type, ChangeType::Fix);
    }

    #[test]
    fn test_breaking_footer_broadcasts_to_all_lines() {
        let message = "feat: add new API\nfix: patch old path\n\nBREAKING CHANGE: removes v1 endpoints";
        let lines = parse_message(message);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.breaking));
    }

    #[test]
    fn test_breaking_alias_type() {
        let lines = parse_message("breaking: drop support for v1 config");
        assert_eq!(lines[0].change_type, ChangeType::Breaking);
    }

    #[test]
    fn test_indented_line_is_trimmed() {
        let lines = parse_message("  feat: padded line  ");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description, "padded line");
    }
}
