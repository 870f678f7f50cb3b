//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section is optional; a missing `[[bet_types]]` table means the built-in
//! PrizePicks catalog.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::strategy::catalog::BetCatalog;
use crate::types::BetType;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Replaces the built-in catalog when non-empty.
    #[serde(default)]
    pub bet_types: Vec<BetType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyzerConfig {
    pub name: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            name: "PropShop".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "Config file not found, using built-in bet catalog");
            Ok(Self::default())
        }
    }

    /// Configuration for a run. A path the caller names must exist; with
    /// none, `config.toml` is optional.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load_or_default(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.catalog()?;
        Ok(config)
    }

    /// The bet catalog this configuration selects.
    pub fn catalog(&self) -> Result<BetCatalog> {
        if self.bet_types.is_empty() {
            return Ok(BetCatalog::builtin().clone());
        }
        BetCatalog::new(self.bet_types.clone()).context("Invalid [[bet_types]] table")
    }
}
