//! Boundary data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit reachable since the prior release, with its associated
/// pull requests
///
/// The commit source contract is oldest-first ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub sha: String,
    /// Full commit message, subject and body
    pub message: String,
    /// Author display name
    pub author_name: String,
    /// Author handle on the hosting service, when known
    #[serde(default)]
    pub author_handle: Option<String>,
    /// Pull requests associated with this commit
    #[serde(default)]
    pub pull_requests: Vec<PullRequestInfo>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author_name: author_name.into(),
            author_handle: None,
            pull_requests: Vec::new(),
        }
    }

    /// Set the author handle
    pub fn with_author_handle(mut self, handle: impl Into<String>) -> Self {
        self.author_handle = Some(handle.into());
        self
    }

    /// Attach an associated pull request
    pub fn with_pull_request(mut self, pull_request: PullRequestInfo) -> Self {
        self.pull_requests.push(pull_request);
        self
    }

    /// First associated pull request flagged as merged, if any
    pub fn merged_pull_request(&self) -> Option<&PullRequestInfo> {
        self.pull_requests.iter().find(|pr| pr.merged)
    }
}

/// A pull request associated with a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestInfo {
    /// Pull request number
    pub number: u64,
    /// Whether the pull request was merged
    #[serde(default)]
    pub merged: bool,
    /// Pull request title
    #[serde(default)]
    pub title: String,
    /// Web URL of the pull request
    #[serde(default)]
    pub url: Option<String>,
    /// Pull request author
    #[serde(default)]
    pub author: Option<PrAuthor>,
    /// Pull request body
    #[serde(default)]
    pub body: Option<String>,
    /// Base branch name
    #[serde(default)]
    pub base_ref: Option<String>,
    /// Head branch name
    #[serde(default)]
    pub head_ref: Option<String>,
}

impl PullRequestInfo {
    /// Create a merged pull request record
    pub fn merged(number: u64, title: impl Into<String>) -> Self {
        Self {
            number,
            merged: true,
            title: title.into(),
            url: None,
            author: None,
            body: None,
            base_ref: None,
            head_ref: None,
        }
    }

    /// Set the author
    pub fn with_author(mut self, author: PrAuthor) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the web URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// A pull request author, as the hosting API may represent it
///
/// Some API payloads carry a plain handle string, others a structured
/// user object; both normalize to a handle via [`PrAuthor::handle`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrAuthor {
    /// Structured user object
    User(UserInfo),
    /// Plain handle string
    Handle(String),
}

impl PrAuthor {
    /// The author's handle, whatever the source representation
    pub fn handle(&self) -> &str {
        match self {
            Self::Handle(handle) => handle,
            Self::User(user) => &user.login,
        }
    }

    /// Whether this author is a bot account
    pub fn is_bot(&self) -> bool {
        match self {
            Self::Handle(_) => false,
            Self::User(user) => user.is_bot(),
        }
    }
}

/// A structured user record from the hosting API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Account login
    pub login: String,
    /// Profile URL
    #[serde(default)]
    pub html_url: Option<String>,
    /// Account type as reported by the API (e.g. `Bot`)
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
}

impl UserInfo {
    /// Create a user record
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            html_url: None,
            account_type: None,
        }
    }

    /// Mark the account as a bot
    pub fn as_bot(mut self) -> Self {
        self.account_type = Some("Bot".to_string());
        self
    }

    /// Set the profile URL
    pub fn with_html_url(mut self, url: impl Into<String>) -> Self {
        self.html_url = Some(url.into());
        self
    }

    /// Whether the account is a bot
    pub fn is_bot(&self) -> bool {
        self.account_type.as_deref() == Some("Bot") || self.login.ends_with("[bot]")
    }
}

/// A release record as seen on the hosting service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseSnapshot {
    /// Tag name of the release
    pub tag_name: String,
    /// Display name of the release
    #[serde(default)]
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ReleaseSnapshot {
    /// Create a release snapshot
    pub fn new(tag_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: String::new(),
            created_at,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
