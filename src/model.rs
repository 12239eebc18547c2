use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolved runtime configuration for directory fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub base_url: String,
    /// Bearer token for the directory API; unauthenticated requests work but
    /// are rate-limited much harder.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    pub per_page: u8,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    pub user_agent: String,
}

/// One entry of the directory listing. The listing returns abbreviated
/// records; only the login is consumed (the full profile comes from a
/// follow-up detail fetch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub login: String,
}

/// Full candidate profile as returned by the directory detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    pub html_url: String,
}

impl Candidate {
    /// Project to the persisted shortlist record. Optional attributes that
    /// the directory returns as empty strings are stored as absent.
    pub fn to_saved(&self) -> SavedCandidate {
        SavedCandidate {
            id: self.id,
            login: self.login.clone(),
            name: normalize(self.name.as_deref()),
            avatar_url: self.avatar_url.clone(),
            location: normalize(self.location.as_deref()),
            email: normalize(self.email.as_deref()),
            company: normalize(self.company.as_deref()),
            bio: normalize(self.bio.as_deref()),
            html_url: self.html_url.clone(),
        }
    }
}

/// Persisted projection of an accepted candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCandidate {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub location: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    pub html_url: String,
}

impl SavedCandidate {
    /// Human-facing name for tables: real name when present, login otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}

/// Treat empty or whitespace-only strings as absent.
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Events emitted by the acquisition engine and consumed by UI/CLI layers.
#[derive(Debug, Clone)]
pub enum ReviewEvent {
    /// A fetch cycle entered the loading state.
    CycleStarted,
    /// One attempt inside a cycle failed; the engine may still retry.
    AttemptFailed { attempt: u32, message: String },
    /// A cycle finished with a candidate ready for review.
    CandidateReady { candidate: Candidate },
    /// A cycle exhausted its retry budget.
    CycleFailed { message: String },
    /// An accepted candidate was appended to the roster.
    CandidateSaved { login: String },
    /// Free-form status message for UI layers.
    Info(String),
}
