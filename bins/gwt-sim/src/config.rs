//! Simulator configuration and scenario files.
//!
//! [`SimConfig`] is read from `--config`, or from `<config_dir>/gwt/sim.toml`
//! when present, then overridden by `GWT_*` environment variables
//! (`GWT_LOG_LEVEL`, `GWT_CARVE__KIND`, ...). Scenarios are TOML or JSON files
//! selected by extension; the environment does not touch them, but a scenario
//! without a carve uses the one from [`SimConfig`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use gwt_core::types::{Ledger, Order, Usage};
use gwt_reward::carve::CarveConfig;
use gwt_reward::history::TimedSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Carve used when a scenario does not name its own.
    pub carve: CarveConfig,
    /// Log level filter string (e.g. "info", "gwt_reward=debug").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            carve: CarveConfig::default(),
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl SimConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gwt").join("sim.toml"))
    }

    /// Load from `path` (required) or the default location (optional), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load), reading `GWT_*` variables from `env`
    /// instead of the process environment when given.
    fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();
        match path {
            Some(p) => builder = builder.add_source(File::from(p)),
            None => {
                if let Some(p) = Self::default_path() {
                    builder = builder.add_source(File::from(p).required(false));
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix("GWT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );
        builder
            .build()
            .context("failed to read simulator config")?
            .try_deserialize()
            .context("invalid simulator config")
    }
}

/// One withdrawal to simulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub order: Order,
    pub usage: Usage,
    /// Settlement time.
    pub now: u64,
    pub snapshots: Vec<TimedSnapshot>,
    /// Balances before the withdrawal.
    #[serde(default)]
    pub ledger: Ledger,
    #[serde(default)]
    pub carve: Option<CarveConfig>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        Config::builder()
            .add_source(File::from(path))
            .build()
            .with_context(|| format!("failed to read scenario {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("invalid scenario {}", path.display()))
    }
}
