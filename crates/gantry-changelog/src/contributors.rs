//! Contributors sentence

use std::collections::BTreeMap;

use tracing::debug;

use gantry_core::config::DrafterConfig;
use gantry_remote::{CommitInfo, PrAuthor};

/// Build the deduplicated contributors sentence for a commit set
///
/// Human authors render as `@handle`, bot authors as a markdown link.
/// Handles listed in `exclude-contributors` are dropped. The result joins
/// as `"a, b and c"`; with nobody left the configured fallback is
/// returned.
pub fn contributors_sentence(commits: &[CommitInfo], config: &DrafterConfig) -> String {
    // Keyed by handle so the same author never appears twice, and the
    // output order is stable across runs.
    let mut entries: BTreeMap<String, String> = BTreeMap::new();

    for commit in commits {
        if let Some(handle) = &commit.author_handle {
            if !is_excluded(handle, config) {
                entries
                    .entry(handle.clone())
                    .or_insert_with(|| format!("@{}", handle));
            }
        }

        if let Some(pr) = commit.merged_pull_request() {
            if let Some(author) = &pr.author {
                let handle = author.handle().to_string();
                if is_excluded(&handle, config) {
                    continue;
                }
                entries
                    .entry(handle.clone())
                    .or_insert_with(|| render_author(author));
            }
        }
    }

    let rendered: Vec<String> = entries.into_values().collect();
    debug!(contributor_count = rendered.len(), "contributors collected");

    if rendered.is_empty() {
        config.no_contributors_template.clone()
    } else {
        join_sentence(&rendered)
    }
}

fn is_excluded(handle: &str, config: &DrafterConfig) -> bool {
    config
        .exclude_contributors
        .iter()
        .any(|excluded| excluded == handle || excluded.trim_start_matches('@') == handle)
}

fn render_author(author: &PrAuthor) -> String {
    if author.is_bot() {
        render_bot(author)
    } else {
        format!("@{}", author.handle())
    }
}

fn render_bot(author: &PrAuthor) -> String {
    let login = author.handle();
    let display = if login.ends_with("[bot]") {
        login.to_string()
    } else {
        format!("{}[bot]", login)
    };

    let url = match author {
        PrAuthor::User(user) => user
            .html_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", login)),
        PrAuthor::Handle(_) => format!("https://github.com/{}", login),
    };

    format!("[{}]({})", display, url)
}

/// Join items as `"a"`, `"a and b"`, `"a, b and c"`
fn join_sentence(items: &[String]) -> String {
    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        n => format!("{} and {}", items[..n - 1].join(", "), items[n - 1]),
    }
}
