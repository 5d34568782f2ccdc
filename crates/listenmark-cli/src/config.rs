//! CLI configuration and question bank resolution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use listenmark_core::bank::QuestionBank;
use listenmark_core::parser::parse_bank;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format: {other} (expected text or json)")),
        }
    }
}

/// Top-level listenmark configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenmarkConfig {
    /// Question bank file; the built-in bank is used when absent.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Show accepted answers next to verdicts.
    #[serde(default)]
    pub reveal_answers: bool,
}

impl ListenmarkConfig {
    /// Resolve the output format, letting a CLI flag win over the config.
    pub fn format_or(&self, flag: Option<&str>) -> Result<OutputFormat> {
        match flag {
            Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!(e)),
            None => Ok(self.format),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `listenmark.toml` in the current directory
/// 2. `~/.config/listenmark/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<ListenmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("listenmark.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ListenmarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(ListenmarkConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("listenmark"))
}

/// Pick the question bank: the `--bank` flag, then the config, then the
/// built-in "Shopping Habits" bank.
pub fn resolve_bank(flag: Option<&Path>, config: &ListenmarkConfig) -> Result<QuestionBank> {
    match flag.or(config.bank.as_deref()) {
        Some(path) => parse_bank(path),
        None => Ok(QuestionBank::shopping_habits()),
    }
}
