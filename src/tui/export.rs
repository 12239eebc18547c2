use crate::model::SavedCandidate;
use crate::storage;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default export location: timestamped file in the current directory.
fn export_path(extension: &str) -> Result<PathBuf> {
    let ts = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into());
    let default_name = format!(
        "devscout-saved-{}.{extension}",
        ts.replace(':', "-").replace('T', "_")
    );
    let current_dir = std::env::current_dir().context("get current directory")?;
    Ok(current_dir.join(default_name))
}

/// Export the roster as JSON. Returns the absolute path of the exported file.
pub fn export_roster_json(roster: &[SavedCandidate]) -> Result<PathBuf> {
    let path = export_path("json")?;
    storage::export_json(&path, roster)?;
    Ok(path)
}

/// Export the roster as CSV. Returns the absolute path of the exported file.
pub fn export_roster_csv(roster: &[SavedCandidate]) -> Result<PathBuf> {
    let path = export_path("csv")?;
    storage::export_csv(&path, roster)?;
    Ok(path)
}
