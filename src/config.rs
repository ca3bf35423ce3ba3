//! Site configuration module.
//!
//! Handles loading and validating the optional `site.toml` next to the
//! catalog in the source directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_name = "Freeplay Arcade"   # Brand used in page titles and the logo
//! games_per_page = 28             # Home listing page size
//!
//! [build]
//! max_workers = 4                 # Max parallel page workers (omit for auto)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early. A malformed file is reported by the
//! build and replaced with stock defaults; configuration problems never
//! abort a run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Brand name used in page titles, the sidebar logo, and footers.
    pub site_name: String,
    /// Number of game cards per home listing page.
    pub games_per_page: usize,
    /// Parallel build settings.
    pub build: BuildConfig,
}

fn default_site_name() -> String {
    "Freeplay Arcade".to_string()
}

const DEFAULT_GAMES_PER_PAGE: usize = 28;

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            games_per_page: DEFAULT_GAMES_PER_PAGE,
            build: BuildConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games_per_page == 0 {
            return Err(ConfigError::Validation(
                "games_per_page must be at least 1".into(),
            ));
        }
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel build settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of parallel page-rendering workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load config from `site.toml` in the given directory.
///
/// A missing file yields the stock defaults. Unknown keys and out-of-range
/// values are errors; the caller decides whether to fall back.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("site.toml");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Arcade Press Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as site.toml next to your games.json catalog.
# Unknown keys will cause an error.

# Brand name used in page titles, the sidebar logo, and footers.
site_name = "Freeplay Arcade"

# Number of game cards per home listing page.
games_per_page = 28

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Maximum parallel page-rendering workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}
