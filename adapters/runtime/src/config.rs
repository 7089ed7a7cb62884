//! Session configuration loaded from TOML.

use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use carbon_quest_world::Rules;
use serde::{Deserialize, Serialize};

/// Timing, seeding and gameplay tuning for a session.
///
/// Every key is optional; missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Real-time length of one simulation tick.
    pub tick_interval_ms: u64,
    /// Time a scan takes to resolve after it starts.
    pub scan_delay_ms: u64,
    /// Time the completed scan progress stays visible.
    pub scan_progress_linger_ms: u64,
    /// Seed of the gameplay random stream; entropy when absent.
    pub seed: Option<u64>,
    /// Gameplay constants.
    pub rules: Rules,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1_000,
            scan_delay_ms: 3_000,
            scan_progress_linger_ms: 1_000,
            seed: None,
            rules: Rules::default(),
        }
    }
}

impl SessionConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid session config at {}", path.display()))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse session config toml contents")?;
        ensure!(
            config.tick_interval_ms > 0,
            "tick_interval_ms must be greater than zero"
        );
        ensure!(
            config.rules.market.min_price <= config.rules.market.max_price,
            "rules.market.min_price must not exceed rules.market.max_price"
        );
        Ok(config)
    }

    /// Tick period as a duration.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Scan resolution delay as a duration.
    #[must_use]
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }

    /// Progress linger as a duration.
    #[must_use]
    pub fn scan_progress_linger(&self) -> Duration {
        Duration::from_millis(self.scan_progress_linger_ms)
    }
}
