// src/config/analyzer.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::types::RowPolicy;
use crate::ingest::DEFAULT_MARKER;
use crate::report::{DEFAULT_OUTPUT, DEFAULT_TITLE};

pub const ENV_CONFIG_PATH: &str = "PRICE_ANALYZER_CONFIG_PATH";
pub const ENV_DIR: &str = "PRICE_ANALYZER_DIR";
pub const ENV_OUTPUT: &str = "PRICE_ANALYZER_OUTPUT";
pub const ENV_ROW_POLICY: &str = "PRICE_ANALYZER_ROW_POLICY";

pub const DEFAULT_TOML_PATH: &str = "config/analyzer.toml";
pub const DEFAULT_JSON_PATH: &str = "config/analyzer.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Directory scanned for price lists.
    pub dir: PathBuf,
    /// Substring a file name must contain.
    pub marker: String,
    pub on_malformed_row: RowPolicy,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            marker: DEFAULT_MARKER.to_string(),
            on_malformed_row: RowPolicy::FailFast,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output: PathBuf,
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Run the interactive search after the report is written.
    pub enabled: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub ingest: IngestConfig,
    pub report: ReportConfig,
    pub console: ConsoleConfig,
}

impl AnalyzerConfig {
    /// Load from an explicit path. `.json` files are read as JSON, everything
    /// else as TOML with a JSON fallback.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, &ext)
            .with_context(|| format!("parsing config {}", path.display()))?;
        cfg.validated()
    }

    /// Resolve the effective config:
    /// 1) $PRICE_ANALYZER_CONFIG_PATH (must exist)
    /// 2) config/analyzer.toml
    /// 3) config/analyzer.json
    /// 4) built-in defaults
    ///
    /// Env overrides are applied on top in every case.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display()));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_TOML_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_TOML_PATH))?
        } else if Path::new(DEFAULT_JSON_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_JSON_PATH))?
        } else {
            Self::default()
        };

        cfg.apply_env()?;
        cfg.validated()
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Some(dir) = env_non_empty(ENV_DIR) {
            self.ingest.dir = PathBuf::from(dir);
        }
        if let Some(out) = env_non_empty(ENV_OUTPUT) {
            self.report.output = PathBuf::from(out);
        }
        if let Some(p) = env_non_empty(ENV_ROW_POLICY) {
            self.ingest.on_malformed_row = p
                .parse()
                .with_context(|| format!("invalid {ENV_ROW_POLICY}"))?;
        }
        Ok(())
    }

    fn validated(self) -> Result<Self> {
        if self.ingest.marker.is_empty() {
            bail!("ingest.marker must not be empty");
        }
        Ok(self)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<AnalyzerConfig> {
    if hint_ext == "json" {
        return Ok(serde_json::from_str(s)?);
    }
    match toml::from_str::<AnalyzerConfig>(s) {
        Ok(cfg) => Ok(cfg),
        Err(toml_err) => serde_json::from_str(s).map_err(|_| anyhow!(toml_err)),
    }
}
