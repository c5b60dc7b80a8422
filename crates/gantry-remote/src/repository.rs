//! Repository identity parsed from a forge URL

use url::Url;

use gantry_core::error::{RemoteError, Result};

/// Owner, repository name and base URL of the hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Scheme and host of the hosting service
    pub base_url: Url,
}

impl RepositoryInfo {
    /// Create repository info from owner and name, assuming github.com
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            base_url: Url::parse("https://github.com").expect("static URL"),
        }
    }

    /// Parse a repository web URL into its parts
    pub fn from_url(url_str: &str) -> Result<Self> {
        let url = Url::parse(url_str).map_err(|e| RemoteError::InvalidRepository {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        let host = url.host_str().ok_or_else(|| RemoteError::InvalidRepository {
            url: url_str.to_string(),
            reason: "missing host".to_string(),
        })?;

        let mut segments = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()))
            .ok_or_else(|| RemoteError::InvalidRepository {
                url: url_str.to_string(),
                reason: "missing path".to_string(),
            })?;

        let owner = segments
            .next()
            .ok_or_else(|| RemoteError::InvalidRepository {
                url: url_str.to_string(),
                reason: "missing owner segment".to_string(),
            })?
            .to_string();

        let repo = segments
            .next()
            .ok_or_else(|| RemoteError::InvalidRepository {
                url: url_str.to_string(),
                reason: "missing repository segment".to_string(),
            })?
            .trim_end_matches(".git")
            .to_string();

        let base_url = Url::parse(&format!("{}://{}", url.scheme(), host)).map_err(|e| {
            RemoteError::InvalidRepository {
                url: url_str.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            owner,
            repo,
            base_url,
        })
    }

    /// Web URL of a pull request
    pub fn pull_request_url(&self, number: u64) -> String {
        format!("{}/{}/{}/pull/{}", self.base(), self.owner, self.repo, number)
    }

    /// Comparison URL between two tags
    pub fn compare_url(&self, base_tag: &str, target_tag: &str) -> String {
        format!(
            "{}/{}/{}/compare/{}...{}",
            self.base(),
            self.owner,
            self.repo,
            base_tag,
            target_tag
        )
    }

    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}
