use crate::acquisition::AcquisitionEngine;
use crate::directory::GithubDirectory;
use crate::model::{FetchConfig, ReviewEvent};
use crate::storage::{self, JsonFileStore, RosterStore};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "devscout",
    version,
    about = "Swipe through developer candidate profiles with optional TUI"
)]
pub struct Cli {
    /// Base URL for the developer directory API
    #[arg(long, default_value = "https://api.github.com")]
    pub base_url: String,

    /// Bearer token for the directory API (falls back to $GITHUB_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Candidates requested per listing call (only the first is reviewed)
    #[arg(long, default_value_t = 30)]
    pub per_page: u8,

    /// Per-request timeout
    #[arg(long, default_value = "10s")]
    pub request_timeout: humantime::Duration,

    /// Fetch one candidate, print JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Fetch one candidate, print a text card and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Print the saved roster as JSON and exit (no TUI)
    #[arg(long)]
    pub list_saved: bool,

    /// Export the saved roster as JSON
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Export the saved roster as CSV
    #[arg(long)]
    pub export_csv: Option<std::path::PathBuf>,

    /// Override the roster storage directory
    #[arg(long)]
    pub data_dir: Option<std::path::PathBuf>,

    /// Automatically fetch the first candidate when the app launches
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub fetch_on_launch: bool,
}

impl Cli {
    /// True for every mode that never enters the TUI.
    pub fn is_headless(&self) -> bool {
        self.json
            || self.text
            || self.list_saved
            || self.export_json.is_some()
            || self.export_csv.is_some()
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.list_saved || args.export_json.is_some() || args.export_csv.is_some() {
        return run_roster(&args);
    }

    if args.json || args.text {
        return run_fetch_once(&args).await;
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(args).await
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        run_fetch_once(&args).await
    }
}

/// Build a `FetchConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> FetchConfig {
    FetchConfig {
        base_url: args.base_url.trim_end_matches('/').to_string(),
        token: args
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok()),
        per_page: args.per_page.max(1),
        request_timeout: Duration::from(args.request_timeout),
        user_agent: format!("devscout/{}", env!("CARGO_PKG_VERSION")),
    }
}

/// Open the roster store configured by the CLI.
pub fn open_store(args: &Cli) -> Result<JsonFileStore> {
    match args.data_dir.as_deref() {
        Some(dir) => Ok(JsonFileStore::in_dir(dir)),
        None => JsonFileStore::default_location().context("locate roster storage"),
    }
}

/// Saved-roster modes: list and exports, no network involved.
fn run_roster(args: &Cli) -> Result<()> {
    let store = open_store(args)?;
    let roster = store.load_all().context("load saved roster")?;

    if let Some(path) = args.export_json.as_deref() {
        storage::export_json(path, &roster).context("export roster as JSON")?;
        eprintln!("Exported JSON: {}", path.display());
    }
    if let Some(path) = args.export_csv.as_deref() {
        storage::export_csv(path, &roster).context("export roster as CSV")?;
        eprintln!("Exported CSV: {}", path.display());
    }
    if args.list_saved {
        println!("{}", serde_json::to_string_pretty(&roster)?);
    }
    Ok(())
}

/// Run exactly one acquisition cycle and print the fetched candidate.
/// Attempt-level noise goes to stderr; only the candidate hits stdout.
async fn run_fetch_once(args: &Cli) -> Result<()> {
    let cfg = build_config(args);
    let directory = GithubDirectory::new(&cfg).context("build directory client")?;
    let store: Arc<dyn RosterStore> = Arc::new(open_store(args)?);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<ReviewEvent>();

    let mut engine = AcquisitionEngine::new(directory, store, event_tx);
    engine.advance().await;

    let mut failure: Option<String> = None;
    while let Ok(ev) = event_rx.try_recv() {
        match ev {
            ReviewEvent::AttemptFailed { attempt, message } => {
                eprintln!("attempt {attempt} failed: {message}");
            }
            ReviewEvent::CycleFailed { message } => failure = Some(message),
            _ => {}
        }
    }
    if let Some(message) = failure {
        return Err(anyhow::anyhow!(message));
    }

    let candidate = engine
        .current()
        .cloned()
        .context("cycle ended without a candidate")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&candidate)?);
    } else {
        for line in crate::text_summary::build_candidate_card(&candidate).lines {
            println!("{line}");
        }
    }
    Ok(())
}
