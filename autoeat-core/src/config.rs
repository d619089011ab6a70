//! Configuration for the autoeat system.
//!
//! Maps directly to `autoeat.toml`:
//!
//! ```toml
//! [general]
//! enabled = true
//! log_level = "info"
//!
//! [feeding]
//! tick_interval_ms = 2000
//! hunger_threshold = 20
//! inventory_capacity = 40
//! food_list_path = "foodlist.txt"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_FOOD_LIST;
use crate::error::{AutoEatError, Result};
use crate::types::{DEFAULT_INVENTORY_CAPACITY, FULL_HUNGER};

/// Top-level autoeat configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoEatConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Feeding loop settings.
    #[serde(default)]
    pub feeding: FeedingConfig,
}

impl AutoEatConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `AutoEatError::Config` if the TOML is invalid or fails validation.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| AutoEatError::Config(e.to_string()))?;
        config.feeding.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General system settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether auto-feeding runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
        }
    }
}

/// Feeding controller tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedingConfig {
    /// Milliseconds between hunger checks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Eat while hunger is strictly below this value.
    #[serde(default = "default_hunger_threshold")]
    pub hunger_threshold: u8,
    /// How many inventory slots to scan, starting at slot 0.
    #[serde(default = "default_inventory_capacity")]
    pub inventory_capacity: usize,
    /// Line-delimited list of edible item identifiers.
    #[serde(default = "default_food_list_path")]
    pub food_list_path: PathBuf,
}

impl FeedingConfig {
    /// Interval between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject settings the controller cannot run with.
    ///
    /// # Errors
    /// Returns `AutoEatError::Config` describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(AutoEatError::Config(
                "feeding.tick_interval_ms must be greater than zero".into(),
            ));
        }
        if self.inventory_capacity == 0 {
            return Err(AutoEatError::Config(
                "feeding.inventory_capacity must be greater than zero".into(),
            ));
        }
        if self.hunger_threshold > FULL_HUNGER {
            return Err(AutoEatError::Config(format!(
                "feeding.hunger_threshold must be at most {FULL_HUNGER}, got {}",
                self.hunger_threshold
            )));
        }
        Ok(())
    }
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2000,
            hunger_threshold: FULL_HUNGER,
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            food_list_path: PathBuf::from(DEFAULT_FOOD_LIST),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_tick_interval_ms() -> u64 { 2000 }
fn default_hunger_threshold() -> u8 { FULL_HUNGER }
fn default_inventory_capacity() -> usize { DEFAULT_INVENTORY_CAPACITY }
fn default_food_list_path() -> PathBuf { PathBuf::from(DEFAULT_FOOD_LIST) }
