//! Review session controller.
//!
//! Owns the acquisition engine and serializes UI commands so that no two
//! acquisition cycles ever overlap.

use crate::acquisition::AcquisitionEngine;
use crate::directory::DirectoryClient;
use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

/// Commands emitted by UI layers to drive the review session.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Accept,
    Reject,
    Retry,
    Quit,
}

/// Drive the engine from UI commands until quit. Commands run one at a time
/// to completion; the only thing that can interrupt a running cycle is quit,
/// which drops the in-flight fetch instead of applying its result.
pub(crate) async fn run_controller<D: DirectoryClient>(
    engine: &mut AcquisitionEngine<D>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
    fetch_on_launch: bool,
) -> Result<()> {
    if fetch_on_launch {
        let interrupted = tokio::select! {
            _ = engine.advance() => false,
            quit = next_quit(&mut cmd_rx) => quit,
        };
        if interrupted {
            return Ok(());
        }
    }

    loop {
        let Some(cmd) = cmd_rx.recv().await else {
            // UI side hung up.
            break;
        };
        if matches!(cmd, UiCommand::Quit) {
            break;
        }
        let interrupted = tokio::select! {
            _ = dispatch(engine, cmd) => false,
            quit = next_quit(&mut cmd_rx) => quit,
        };
        if interrupted {
            break;
        }
    }
    Ok(())
}

async fn dispatch<D: DirectoryClient>(engine: &mut AcquisitionEngine<D>, cmd: UiCommand) {
    match cmd {
        UiCommand::Accept => engine.accept().await,
        UiCommand::Reject => engine.reject().await,
        UiCommand::Retry => engine.retry().await,
        UiCommand::Quit => {}
    }
}

/// Wait for a quit while a cycle is running. Other commands arriving
/// mid-cycle are dropped; the UI disables those controls while loading, so
/// anything that slips through raced the cycle and loses.
async fn next_quit(cmd_rx: &mut UnboundedReceiver<UiCommand>) -> bool {
    loop {
        match cmd_rx.recv().await {
            Some(UiCommand::Quit) | None => return true,
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::AcquisitionPhase;
    use crate::directory::DirectoryError;
    use crate::model::{Candidate, CandidateSummary, ReviewEvent};
    use crate::storage::{MemoryStore, RosterStore};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    /// Directory that yields candidates with increasing ids.
    #[derive(Default)]
    struct CountingDirectory {
        next_id: AtomicU64,
    }

    impl DirectoryClient for CountingDirectory {
        async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, DirectoryError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(vec![CandidateSummary {
                login: format!("user{id}"),
            }])
        }

        async fn get_candidate_detail(&self, login: &str) -> Result<Candidate, DirectoryError> {
            let id: u64 = login.trim_start_matches("user").parse().unwrap_or(0);
            Ok(Candidate {
                id,
                login: login.to_string(),
                name: None,
                avatar_url: String::new(),
                location: None,
                email: None,
                company: None,
                bio: None,
                html_url: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn commands_run_in_order_until_quit() {
        let roster = Arc::new(MemoryStore::new());
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ReviewEvent>();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let mut engine =
            AcquisitionEngine::new(CountingDirectory::default(), roster.clone(), event_tx);

        // Feed the next command only once the previous cycle completed, the
        // way a UI (with controls disabled while loading) would.
        let driver = async {
            let script = [UiCommand::Reject, UiCommand::Accept, UiCommand::Quit];
            let mut next = 0;
            while next < script.len() {
                match event_rx.recv().await {
                    Some(ReviewEvent::CandidateReady { .. }) => {
                        cmd_tx.send(script[next].clone()).unwrap();
                        next += 1;
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        };

        let (res, ()) = tokio::join!(run_controller(&mut engine, cmd_rx, true), driver);
        res.unwrap();

        let saved: Vec<String> = roster
            .load_all()
            .unwrap()
            .into_iter()
            .map(|c| c.login)
            .collect();
        assert_eq!(saved, vec!["user2".to_string()]);
        assert_eq!(engine.phase(), AcquisitionPhase::Ready);
        assert_eq!(engine.current().unwrap().login, "user3");
    }

    #[tokio::test]
    async fn closed_channel_ends_the_session() {
        let roster = Arc::new(MemoryStore::new());
        let (event_tx, _event_rx) = mpsc::unbounded_channel::<ReviewEvent>();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
        drop(cmd_tx);
        let mut engine = AcquisitionEngine::new(CountingDirectory::default(), roster, event_tx);

        run_controller(&mut engine, cmd_rx, false).await.unwrap();
        assert_eq!(engine.phase(), AcquisitionPhase::Idle);
    }
}
