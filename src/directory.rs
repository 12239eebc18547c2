//! Remote directory client.
//!
//! Thin wrapper over the GitHub REST API: one listing call and one detail
//! call. No caching and no retrying here; retry policy belongs to the
//! acquisition engine one level up.

use crate::model::{Candidate, CandidateSummary, FetchConfig};
use rand::Rng;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Failures surfaced by directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("directory returned {status}")]
    Status { status: StatusCode },
    #[error("no profile for login '{login}'")]
    NotFound { login: String },
}

/// Read-only directory operations, abstracted so the acquisition engine can
/// be exercised against a scripted fake.
pub trait DirectoryClient: Send + Sync {
    /// Fetch a batch of candidate summaries. Callers take the first entry.
    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, DirectoryError>;

    /// Fetch the full profile for one login.
    async fn get_candidate_detail(&self, login: &str) -> Result<Candidate, DirectoryError>;
}

/// Production client against the GitHub users API.
pub struct GithubDirectory {
    cfg: FetchConfig,
    client: Client,
}

impl GithubDirectory {
    pub fn new(cfg: &FetchConfig) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.request_timeout)
            .build()?;
        Ok(Self {
            cfg: cfg.clone(),
            client,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = self.cfg.token.as_deref() {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }
}

impl DirectoryClient for GithubDirectory {
    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, DirectoryError> {
        // Random offset so consecutive listings surface different profiles.
        let since: u32 = rand::thread_rng().gen_range(0..100_000_000);
        let url = format!(
            "{}/users?since={}&per_page={}",
            self.cfg.base_url, since, self.cfg.per_page
        );
        debug!(%url, "listing candidates");

        let response = self.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DirectoryError::Status {
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    async fn get_candidate_detail(&self, login: &str) -> Result<Candidate, DirectoryError> {
        let url = format!("{}/users/{}", self.cfg.base_url, login);
        debug!(%url, "fetching candidate detail");

        let response = self.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound {
                login: login.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(DirectoryError::Status {
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }
}
