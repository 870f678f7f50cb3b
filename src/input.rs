//! Quote board input.
//!
//! The scraper hands over a JSON object keyed by player. It arrives either
//! as a file or on stdin; blank input means the scrape came back empty.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::strategy::QuoteBoard;

/// Read a quote board from `path`, or from `stdin` when the path is absent
/// or `-`.
pub fn read_board(path: Option<&Path>, mut stdin: impl Read) -> Result<QuoteBoard> {
    let contents = match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read quotes from {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("Failed to read quotes from stdin")?;
            buf
        }
    };

    parse_board(&contents)
}

/// Parse board JSON. Blank input is an empty board.
pub fn parse_board(contents: &str) -> Result<QuoteBoard> {
    if contents.trim().is_empty() {
        warn!("No quotes received");
        return Ok(QuoteBoard::new());
    }

    serde_json::from_str(contents).context("Failed to parse quote board JSON")
}
