//! The persistence wrapper around the catalogue core.
//!
//! The core never touches disk: it receives a deserialized snapshot to
//! resume from and hands back full replacement state, which is written
//! wholesale here after every mutation.

use anyhow::{Context, Result};
use catalog::CatalogState;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load(path: &Path) -> Result<CatalogState> {
    if !path.exists() {
        info!(path = %path.display(), "no snapshot found, starting with an empty catalogue");
        return Ok(CatalogState::default());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let state = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
    Ok(state)
}

pub fn save(path: &Path, state: &CatalogState) -> Result<()> {
    let json = serde_json::to_string_pretty(state).context("failed to serialize snapshot")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write snapshot {}", path.display()))?;
    Ok(())
}
