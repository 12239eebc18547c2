//! Candidate acquisition state machine.
//!
//! Drives "fetch the next candidate to review" cycles against the directory
//! client, with a bounded immediate-retry policy, and writes accepted
//! candidates through to the roster. Presentation layers observe the engine
//! through `ReviewEvent`s.

use crate::directory::DirectoryClient;
use crate::model::{Candidate, ReviewEvent};
use crate::storage::RosterStore;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Extra attempts allowed after the first failure of a cycle: a fully
/// failing cycle makes 1 + MAX_RETRIES attempts in total.
pub const MAX_RETRIES: u32 = 3;

/// The one user-facing message for an exhausted cycle. Individual attempt
/// failures are never shown.
pub const EXHAUSTED_MESSAGE: &str = "Unable to load candidate. Please try again later.";

/// Observable engine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionPhase {
    Idle,
    Loading,
    Ready,
    Failed,
}

pub struct AcquisitionEngine<D> {
    directory: D,
    roster: Arc<dyn RosterStore>,
    event_tx: UnboundedSender<ReviewEvent>,
    // The previous candidate stays in state while a cycle loads; the UI
    // hides it until replaced.
    current: Option<Candidate>,
    failures: u32,
    phase: AcquisitionPhase,
}

impl<D: DirectoryClient> AcquisitionEngine<D> {
    pub fn new(
        directory: D,
        roster: Arc<dyn RosterStore>,
        event_tx: UnboundedSender<ReviewEvent>,
    ) -> Self {
        Self {
            directory,
            roster,
            event_tx,
            current: None,
            failures: 0,
            phase: AcquisitionPhase::Idle,
        }
    }

    pub fn phase(&self) -> AcquisitionPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&Candidate> {
        self.current.as_ref()
    }

    /// Run one acquisition cycle: list the directory, take the first login,
    /// fetch its profile. Failed attempts (including an empty listing) retry
    /// immediately with no backoff until the budget runs out. The loading
    /// state spans the whole chain and clears exactly once on the way out.
    pub async fn advance(&mut self) {
        self.phase = AcquisitionPhase::Loading;
        let _ = self.event_tx.send(ReviewEvent::CycleStarted);

        loop {
            match self.fetch_once().await {
                Ok(candidate) => {
                    self.failures = 0;
                    self.phase = AcquisitionPhase::Ready;
                    self.current = Some(candidate.clone());
                    let _ = self.event_tx.send(ReviewEvent::CandidateReady { candidate });
                    return;
                }
                Err(message) => {
                    if self.failures < MAX_RETRIES {
                        self.failures += 1;
                        debug!(attempt = self.failures, %message, "fetch attempt failed, retrying");
                        let _ = self.event_tx.send(ReviewEvent::AttemptFailed {
                            attempt: self.failures,
                            message,
                        });
                        continue;
                    }
                    self.phase = AcquisitionPhase::Failed;
                    let _ = self.event_tx.send(ReviewEvent::CycleFailed {
                        message: EXHAUSTED_MESSAGE.to_string(),
                    });
                    return;
                }
            }
        }
    }

    /// Persist the current candidate and fetch the next one. Without a
    /// current candidate nothing is persisted and the cycle still runs.
    pub async fn accept(&mut self) {
        if let Some(candidate) = self.current.as_ref() {
            let saved = candidate.to_saved();
            let login = saved.login.clone();
            match self.roster.append(saved) {
                Ok(()) => {
                    let _ = self.event_tx.send(ReviewEvent::CandidateSaved { login });
                }
                Err(e) => {
                    let _ = self
                        .event_tx
                        .send(ReviewEvent::Info(format!("Save failed: {e}")));
                }
            }
        }
        self.advance().await;
    }

    /// Discard the current candidate and fetch the next one. No persistence
    /// effect.
    pub async fn reject(&mut self) {
        self.advance().await;
    }

    /// Restart after an exhausted cycle with a fresh retry budget.
    pub async fn retry(&mut self) {
        self.failures = 0;
        self.advance().await;
    }

    async fn fetch_once(&self) -> Result<Candidate, String> {
        let summaries = self
            .directory
            .list_candidates()
            .await
            .map_err(|e| e.to_string())?;
        // An empty batch is a failed attempt, not a success with nothing to
        // show.
        let Some(first) = summaries.first() else {
            return Err("directory returned no candidates".to_string());
        };
        self.directory
            .get_candidate_detail(&first.login)
            .await
            .map_err(|e| e.to_string())
    }
}
