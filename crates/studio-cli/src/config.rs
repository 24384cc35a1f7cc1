//! # Quote Configuration
//!
//! Configuration management for the `studio-quote` command.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STUDIO_DAY_START_HOUR=9                                            │
//! │     STUDIO_RATE_TABLE=/etc/studio/rates.json                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, otherwise                                         │
//! │     ~/.config/studio-quote/quote.toml (Linux)                          │
//! │     ~/Library/Application Support/com.studio.quote/quote.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     DAY 08:00–22:00, 30-minute units, 120-minute minimum               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quote.toml
//! [schedule]
//! day_start_hour = 8
//! night_start_hour = 22
//!
//! [booking]
//! unit_minutes = 30
//! min_reservation_minutes = 120
//! min_headcount = 1
//! max_headcount = 10
//!
//! [rates]
//! # JSON array of {band, headcount, pricePerUnit}; replaces the built-in table
//! table_path = "/etc/studio/rates.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use studio_core::validation::validate_rate_table;
use studio_core::{BandSchedule, QuotePolicy, RateTable};

use crate::error::{CliError, CliResult};

// =============================================================================
// Schedule Settings
// =============================================================================

/// Where the DAY band starts and ends on the local clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,

    #[serde(default = "default_night_start_hour")]
    pub night_start_hour: u32,
}

fn default_day_start_hour() -> u32 {
    studio_core::DAY_START_HOUR
}

fn default_night_start_hour() -> u32 {
    studio_core::NIGHT_START_HOUR
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        ScheduleSettings {
            day_start_hour: default_day_start_hour(),
            night_start_hour: default_night_start_hour(),
        }
    }
}

// =============================================================================
// Booking Settings
// =============================================================================

/// Unit length and the limits a reservation must respect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSettings {
    /// Length of one billable unit (minutes).
    #[serde(default = "default_unit_minutes")]
    pub unit_minutes: i64,

    /// Shortest bookable reservation (minutes).
    #[serde(default = "default_min_reservation_minutes")]
    pub min_reservation_minutes: i64,

    #[serde(default = "default_min_headcount")]
    pub min_headcount: u32,

    #[serde(default = "default_max_headcount")]
    pub max_headcount: u32,
}

fn default_unit_minutes() -> i64 {
    studio_core::UNIT_DURATION_MINUTES
}

fn default_min_reservation_minutes() -> i64 {
    studio_core::MIN_RESERVATION_MINUTES
}

fn default_min_headcount() -> u32 {
    studio_core::MIN_HEADCOUNT
}

fn default_max_headcount() -> u32 {
    studio_core::MAX_HEADCOUNT
}

impl Default for BookingSettings {
    fn default() -> Self {
        BookingSettings {
            unit_minutes: default_unit_minutes(),
            min_reservation_minutes: default_min_reservation_minutes(),
            min_headcount: default_min_headcount(),
            max_headcount: default_max_headcount(),
        }
    }
}

// =============================================================================
// Rate Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateSettings {
    /// JSON rate table replacing the built-in one. Requests that carry their
    /// own `rateTable` still take precedence.
    #[serde(default)]
    pub table_path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration for the quote command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub schedule: ScheduleSettings,

    #[serde(default)]
    pub booking: BookingSettings,

    #[serde(default)]
    pub rates: RateSettings,
}

impl QuoteConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quote.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading quote config from file");
                config = Self::from_file(&path)?;
            } else if explicit {
                return Err(CliError::InvalidConfig(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        match self.base_policy().problems() {
            Some(problem) => Err(CliError::InvalidConfig(problem)),
            None => Ok(()),
        }
    }

    /// Builds the engine policy, reading the rate table file if one is set.
    pub fn to_policy(&self) -> CliResult<QuotePolicy> {
        let mut policy = self.base_policy();
        if let Some(path) = &self.rates.table_path {
            info!(?path, "Loading rate table");
            let contents = std::fs::read_to_string(path)?;
            let table = RateTable::from_json(&contents).map_err(|e| {
                CliError::InvalidConfig(format!("rate table {}: {}", path.display(), e))
            })?;
            validate_rate_table(&table, &policy).map_err(|e| {
                CliError::InvalidConfig(format!("rate table {}: {}", path.display(), e))
            })?;
            policy.default_rate_table = table;
        }
        Ok(policy)
    }

    fn base_policy(&self) -> QuotePolicy {
        QuotePolicy {
            schedule: BandSchedule::new(
                self.schedule.day_start_hour,
                self.schedule.night_start_hour,
            ),
            unit_minutes: self.booking.unit_minutes,
            min_reservation_minutes: self.booking.min_reservation_minutes,
            min_headcount: self.booking.min_headcount,
            max_headcount: self.booking.max_headcount,
            ..QuotePolicy::default()
        }
    }

    /// Applies `STUDIO_*` overrides; `lookup` is normally `std::env::var`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(hour) = parse_override(&lookup, "STUDIO_DAY_START_HOUR") {
            debug!(hour, "Overriding day start from environment");
            self.schedule.day_start_hour = hour;
        }

        if let Some(hour) = parse_override(&lookup, "STUDIO_NIGHT_START_HOUR") {
            debug!(hour, "Overriding night start from environment");
            self.schedule.night_start_hour = hour;
        }

        if let Some(minutes) = parse_override(&lookup, "STUDIO_UNIT_MINUTES") {
            self.booking.unit_minutes = minutes;
        }

        if let Some(minutes) = parse_override(&lookup, "STUDIO_MIN_RESERVATION_MINUTES") {
            self.booking.min_reservation_minutes = minutes;
        }

        if let Some(path) = lookup("STUDIO_RATE_TABLE") {
            debug!(path = %path, "Overriding rate table from environment");
            self.rates.table_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "studio", "quote")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}
