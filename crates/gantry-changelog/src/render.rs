//! Categorized changelog rendering

use regex::Regex;
use std::sync::LazyLock;

use tracing::{debug, instrument};

use gantry_core::config::{defaults::GHOST_AUTHOR, CategoryConfig, DrafterConfig};
use gantry_core::template::{render, Variables};
use gantry_remote::RepositoryInfo;

use crate::collection::ChangeCollection;
use crate::types::ChangeRecord;

/// Inline code spans are passed through title escaping untouched
static CODE_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`.*?`").expect("Invalid regex"));

/// Category token matching any record with the breaking flag
const BREAKING_TOKEN: &str = "breaking";

/// Render the categorized changelog body for a change collection
///
/// Records are partitioned into the configured categories in first-match
/// order; unmatched records render first as an uncategorized block.
/// An empty collection renders the no-changes template verbatim.
#[instrument(skip(collection, config, repo), fields(record_count = collection.len()))]
pub fn render_changes(
    collection: &ChangeCollection,
    config: &DrafterConfig,
    repo: Option<&RepositoryInfo>,
) -> String {
    if collection.is_empty() {
        return config.no_changes_template.clone();
    }

    let mut category_items: Vec<Vec<&ChangeRecord>> = vec![Vec::new(); config.categories.len()];
    let mut uncategorized: Vec<&ChangeRecord> = Vec::new();

    for record in collection {
        match first_matching_category(record, &config.categories) {
            Some(index) => category_items[index].push(record),
            None => uncategorized.push(record),
        }
    }

    let mut sections: Vec<String> = Vec::new();

    if !uncategorized.is_empty() {
        let lines: Vec<String> = uncategorized
            .iter()
            .map(|&record| render_change(record, config, repo))
            .collect();
        sections.push(lines.join("\n"));
    }

    for (category, items) in config.categories.iter().zip(category_items) {
        if items.is_empty() {
            continue;
        }

        let mut header_variables = Variables::new();
        header_variables.set("TITLE", category.title.clone());
        let header = render(&config.category_template, &header_variables);

        let lines: Vec<String> = items
            .iter()
            .map(|&record| render_change(record, config, repo))
            .collect();
        let mut body = lines.join("\n");

        if category.collapse_after > 0 && items.len() > category.collapse_after {
            body = collapse_block(&body, items.len());
        }

        sections.push(format!("{}\n\n{}", header, body));
    }

    let output = sections.join("\n\n");
    debug!(section_count = sections.len(), "changelog rendered");
    output
}

fn first_matching_category(record: &ChangeRecord, categories: &[CategoryConfig]) -> Option<usize> {
    categories.iter().position(|category| {
        category.commit_types.iter().any(|token| {
            token == record.change_type.as_str() || (token == BREAKING_TOKEN && record.breaking)
        })
    })
}

/// Render a single change line through the change template
fn render_change(
    record: &ChangeRecord,
    config: &DrafterConfig,
    repo: Option<&RepositoryInfo>,
) -> String {
    let mut title = sentence_case(&record.description);
    if !config.change_title_escapes.is_empty() {
        title = escape_title(&title, &config.change_title_escapes);
    }

    let url = match (repo, record.pr_number) {
        (Some(repo), Some(number)) => repo.pull_request_url(number),
        _ => String::new(),
    };

    let pull_request = record.pull_request.as_ref();

    let mut variables = Variables::new();
    variables
        .set("TITLE", title)
        .set(
            "NUMBER",
            record
                .pr_number
                .map(|number| number.to_string())
                .unwrap_or_default(),
        )
        .set(
            "AUTHOR",
            record.author.clone().unwrap_or_else(|| GHOST_AUTHOR.to_string()),
        )
        .set("SHA", record.short_sha())
        .set("URL", url)
        .set_opt("BODY", pull_request.and_then(|pr| pr.body.clone()))
        .set_opt(
            "BASE_REF_NAME",
            pull_request.and_then(|pr| pr.base_ref.clone()),
        )
        .set_opt(
            "HEAD_REF_NAME",
            pull_request.and_then(|pr| pr.head_ref.clone()),
        );

    render(&config.change_template, &variables)
}

/// Wrap a category's rendered items in a collapsible block
fn collapse_block(body: &str, count: usize) -> String {
    let noun = if count == 1 { "change" } else { "changes" };
    format!(
        "<details>\n<summary>{} {}</summary>\n\n{}\n\n</details>",
        count, noun, body
    )
}

/// Uppercase the first character
fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Escape the configured characters in a title, outside code spans
///
/// `@` and `#` are followed by an empty HTML comment to suppress mention
/// and auto-link interpretation; every other escape character gets a
/// backslash prefix.
fn escape_title(title: &str, escapes: &str) -> String {
    let mut output = String::with_capacity(title.len());
    let mut last = 0;

    for span in CODE_SPAN_REGEX.find_iter(title) {
        output.push_str(&escape_segment(&title[last..span.start()], escapes));
        output.push_str(span.as_str());
        last = span.end();
    }
    output.push_str(&escape_segment(&title[last..], escapes));

    output
}

fn escape_segment(segment: &str, escapes: &str) -> String {
    let mut output = String::with_capacity(segment.len());
    for c in segment.chars() {
        if escapes.contains(c) {
            if c == '@' || c == '#' {
                output.push(c);
                output.push_str("<!---->");
            } else {
                output.push('\\');
                output.push(c);
            }
        } else {
            output.push(c);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_remote::CommitInfo;

    fn make_commit(message: &str) -> CommitInfo {
        CommitInfo::new("abc1234567890", message, "Test Author")
    }

    fn collection(messages: &[&str]) -> ChangeCollection {
        let commits: Vec<CommitInfo> = messages.iter().map(|m| make_commit(m)).collect();
        ChangeCollection::from_commits(&commits)
    }

    fn config_with_categories(categories: Vec<CategoryConfig>) -> DrafterConfig {
        DrafterConfig {
            categories,
            change_template: "* $TITLE".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_collection_renders_no_changes_template() {
        let config = DrafterConfig::default();
        let output = render_changes(&ChangeCollection::default(), &config, None);
        assert_eq!(output, config.no_changes_template);
    }

    #[test]
    fn test_uncategorized_renders_flat_without_categories() {
        let config = config_with_categories(vec![]);
        let output = render_changes(&collection(&["feat: add parser"]), &config, None);
        assert_eq!(output, "* Add parser");
    }

    #[test]
    fn test_first_match_partition() {
        let config = config_with_categories(vec![
            CategoryConfig::new("Everything", &["feat", "fix"]),
            CategoryConfig::new("Features", &["feat"]),
        ]);

        let output = render_changes(&collection(&["feat: add parser"]), &config, None);
        assert!(output.contains("## Everything"));
        assert!(!output.contains("## Features"));
    }

    #[test]
    fn test_breaking_token_matches_breaking_records() {
        let config = config_with_categories(vec![
            CategoryConfig::new("Breaking Changes", &["breaking"]),
            CategoryConfig::new("Features", &["feat"]),
        ]);

        let output = render_changes(
            &collection(&["feat!: drop legacy api", "feat: add parser"]),
            &config,
            None,
        );

        let breaking_index = output.find("## Breaking Changes").unwrap();
        let features_index = output.find("## Features").unwrap();
        assert!(breaking_index < features_index);
        assert!(output.contains("* Drop legacy api"));
    }

    #[test]
    fn test_uncategorized_renders_before_categories() {
        let config = config_with_categories(vec![CategoryConfig::new("Features", &["feat"])]);

        let output = render_changes(
            &collection(&["feat: add parser", "docs: update readme"]),
            &config,
            None,
        );

        let uncategorized_index = output.find("* Update readme").unwrap();
        let features_index = output.find("## Features").unwrap();
        assert!(uncategorized_index < features_index);
    }

    #[test]
    fn test_empty_categories_are_skipped() {
        let config = config_with_categories(vec![
            CategoryConfig::new("Features", &["feat"]),
            CategoryConfig::new("Bug Fixes", &["fix"]),
        ]);

        let output = render_changes(&collection(&["feat: add parser"]), &config, None);
        assert!(!output.contains("## Bug Fixes"));
    }

    #[test]
    fn test_collapse_over_threshold() {
        let config = config_with_categories(vec![
            CategoryConfig::new("Features", &["feat"]).with_collapse_after(2)
        ]);

        let output = render_changes(
            &collection(&["feat: one", "feat: two", "feat: three"]),
            &config,
            None,
        );

        assert!(output.contains("<details>"));
        assert!(output.contains("<summary>3 changes</summary>"));
        // All items live inside the block, not just the overflow.
        let details_index = output.find("<details>").unwrap();
        assert!(output.find("* One").unwrap() > details_index);
    }

    #[test]
    fn test_no_collapse_at_threshold() {
        let config = config_with_categories(vec![
            CategoryConfig::new("Features", &["feat"]).with_collapse_after(2)
        ]);

        let output = render_changes(&collection(&["feat: one", "feat: two"]), &config, None);
        assert!(!output.contains("<details>"));
    }

    #[test]
    fn test_change_template_variables() {
        let mut config = DrafterConfig::default();
        config.change_template = "* $TITLE (#$NUMBER) @$AUTHOR $SHA $URL".to_string();

        let commit = make_commit("feat: add widgets (#123)").with_author_handle("octocat");
        let repo = RepositoryInfo::new("acme", "widget");
        let output = render_changes(
            &ChangeCollection::from_commits(&[commit]),
            &config,
            Some(&repo),
        );

        assert_eq!(
            output,
            "* Add widgets (#123) @octocat abc1234 https://github.com/acme/widget/pull/123"
        );
    }

    #[test]
    fn test_missing_author_defaults_to_ghost() {
        let config = DrafterConfig::default();
        let output = render_changes(&collection(&["feat: add parser"]), &config, None);
        assert!(output.contains("@ghost"));
    }

    #[test]
    fn test_escape_title_backslash() {
        assert_eq!(escape_title("a<b>", "<>"), "a\\<b\\>");
    }

    #[test]
    fn test_escape_title_comment_marker_for_mentions() {
        assert_eq!(
            escape_title("ping @octocat about #42", "@#"),
            "ping @<!---->octocat about #<!---->42"
        );
    }

    #[test]
    fn test_escape_title_skips_code_spans() {
        assert_eq!(
            escape_title("`#code` other #tag", "#"),
            "`#code` other #<!---->tag"
        );
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(sentence_case("add parser"), "Add parser");
        assert_eq!(sentence_case(""), "");
        assert_eq!(sentence_case("Already"), "Already");
    }
}
