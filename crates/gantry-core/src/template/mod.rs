//! Template rendering
//!
//! Substitutes `$VARIABLE` placeholders in string templates and applies
//! ordered search/replace rules. Variable substitution is longest-key-first
//! so that `$NEXT_MAJOR_VERSION_MAJOR` is never shadowed by a premature
//! match on `$NEXT_MAJOR_VERSION`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A set of named template variables
///
/// Keys are stored without the leading `$`. Absent (`None`) values
/// substitute as the empty string.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    entries: Vec<(String, String)>,
}

impl Variables {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value, replacing any previous value for the key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
        self
    }

    /// Set a variable from an optional value; `None` substitutes as empty
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        self.set(key, value.unwrap_or_default())
    }

    /// Look up a variable value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Keys ordered longest-first for substitution
    fn keys_longest_first(&self) -> Vec<&(String, String)> {
        let mut ordered: Vec<&(String, String)> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        ordered
    }
}

/// Render a template by substituting every `$KEY` occurrence
pub fn render(template: &str, variables: &Variables) -> String {
    let mut output = template.to_string();
    for (key, value) in variables.keys_longest_first() {
        let token = format!("${}", key);
        output = output.replace(&token, value);
    }
    output
}

/// A single search/replace rule
///
/// `search` is either a plain string or a `/pattern/flags` regex literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Replacer {
    /// Search pattern
    pub search: String,
    /// Replacement text (regex rules honor `$1` capture references)
    pub replace: String,
}

/// Apply an ordered list of replacer rules as a sequential pipeline
///
/// Each rule runs against the already-transformed output of the previous
/// rule. A malformed rule is skipped without aborting the rest.
pub fn apply_replacers(input: &str, rules: &[Replacer]) -> String {
    let mut output = input.to_string();
    for rule in rules {
        match apply_rule(&output, rule) {
            Some(next) => output = next,
            None => {
                warn!(search = %rule.search, "skipping malformed replacer rule");
            }
        }
    }
    output
}

fn apply_rule(input: &str, rule: &Replacer) -> Option<String> {
    if rule.search.is_empty() {
        return None;
    }

    if let Some((pattern, flags)) = parse_regex_literal(&rule.search) {
        let re = compile_with_flags(pattern, flags)?;
        let replaced = if flags.contains('g') {
            re.replace_all(input, rule.replace.as_str())
        } else {
            re.replace(input, rule.replace.as_str())
        };
        return Some(replaced.into_owned());
    }

    Some(input.replace(&rule.search, &rule.replace))
}

/// Split a `/pattern/flags` literal into its parts
fn parse_regex_literal(search: &str) -> Option<(&str, &str)> {
    if !search.starts_with('/') || search.len() < 2 {
        return None;
    }
    let close = search.rfind('/')?;
    if close == 0 {
        return None;
    }
    let pattern = &search[1..close];
    let flags = &search[close + 1..];
    if flags.chars().any(|c| !"gimsuyx".contains(c)) {
        return None;
    }
    Some((pattern, flags))
}

fn compile_with_flags(pattern: &str, flags: &str) -> Option<Regex> {
    let mut inline = String::new();
    for flag in flags.chars() {
        match flag {
            'i' => inline.push('i'),
            'm' => inline.push('m'),
            's' => inline.push('s'),
            'x' => inline.push('x'),
            // 'g' selects replace-all; 'u' and 'y' have no mapping here
            _ => {}
        }
    }

    let full = if inline.is_empty() {
        pattern.to_string()
    } else {
        format!("(?{}){}", inline, pattern)
    };

    Regex::new(&full).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        let mut v = Variables::new();
        for (key, value) in pairs {
            v.set(*key, *value);
        }
        v
    }

    #[test]
    fn test_render_simple() {
        let v = vars(&[("TITLE", "add parser"), ("NUMBER", "42")]);
        assert_eq!(render("* $TITLE (#$NUMBER)", &v), "* add parser (#42)");
    }

    #[test]
    fn test_render_longest_key_first() {
        let v = vars(&[
            ("NEXT_MAJOR_VERSION", "2.0.0"),
            ("NEXT_MAJOR_VERSION_MAJOR", "2"),
        ]);
        assert_eq!(
            render("$NEXT_MAJOR_VERSION_MAJOR / $NEXT_MAJOR_VERSION", &v),
            "2 / 2.0.0"
        );
    }

    #[test]
    fn test_render_absent_value_is_empty() {
        let mut v = Variables::new();
        v.set_opt("AUTHOR", None);
        assert_eq!(render("by $AUTHOR.", &v), "by .");
    }

    #[test]
    fn test_render_unknown_token_untouched() {
        let v = vars(&[("TITLE", "x")]);
        assert_eq!(render("$TITLE $UNKNOWN", &v), "x $UNKNOWN");
    }

    #[test]
    fn test_replacer_plain_string_replaces_all() {
        let rules = vec![Replacer {
            search: "JIRA-".to_string(),
            replace: "PROJ-".to_string(),
        }];
        assert_eq!(
            apply_replacers("JIRA-1 and JIRA-2", &rules),
            "PROJ-1 and PROJ-2"
        );
    }

    #[test]
    fn test_replacer_regex_literal() {
        let rules = vec![Replacer {
            search: "/issue-(\\d+)/g".to_string(),
            replace: "[#$1](https://issues.example.com/$1)".to_string(),
        }];
        assert_eq!(
            apply_replacers("see issue-7 and issue-9", &rules),
            "see [#7](https://issues.example.com/7) and [#9](https://issues.example.com/9)"
        );
    }

    #[test]
    fn test_replacer_regex_first_match_without_g() {
        let rules = vec![Replacer {
            search: "/foo/".to_string(),
            replace: "bar".to_string(),
        }];
        assert_eq!(apply_replacers("foo foo", &rules), "bar foo");
    }

    #[test]
    fn test_replacer_case_insensitive_flag() {
        let rules = vec![Replacer {
            search: "/breaking/gi".to_string(),
            replace: "BREAKING".to_string(),
        }];
        assert_eq!(
            apply_replacers("Breaking and breaking", &rules),
            "BREAKING and BREAKING"
        );
    }

    #[test]
    fn test_replacer_pipeline_is_sequential() {
        let rules = vec![
            Replacer {
                search: "a".to_string(),
                replace: "b".to_string(),
            },
            Replacer {
                search: "b".to_string(),
                replace: "c".to_string(),
            },
        ];
        // Second rule sees the output of the first.
        assert_eq!(apply_replacers("a", &rules), "c");
    }

    #[test]
    fn test_replacer_malformed_is_skipped() {
        let rules = vec![
            Replacer {
                search: "/[unclosed/g".to_string(),
                replace: "x".to_string(),
            },
            Replacer {
                search: "keep".to_string(),
                replace: "kept".to_string(),
            },
        ];
        assert_eq!(apply_replacers("keep going", &rules), "kept going");
    }
}
