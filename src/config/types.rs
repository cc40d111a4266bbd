//! Configuration types
//!
//! ```yaml
//! providers:
//!   countries_delay_ms: 300
//!   numbers_delay_ms: 400
//!   plans_delay_ms: 200
//!   register_delay_ms: 600
//!   pay_delay_ms: 900
//!   failure_rate: 0.0
//!   seed: 42
//! ui:
//!   tick_rate_ms: 50
//! logging:
//!   level: info
//!   file: /tmp/cooee.log
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CooeeConfig {
    #[serde(default)]
    pub providers: ProviderConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulated backend behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default = "default_countries_delay")]
    pub countries_delay_ms: u64,

    #[serde(default = "default_numbers_delay")]
    pub numbers_delay_ms: u64,

    #[serde(default = "default_plans_delay")]
    pub plans_delay_ms: u64,

    #[serde(default = "default_register_delay")]
    pub register_delay_ms: u64,

    #[serde(default = "default_pay_delay")]
    pub pay_delay_ms: u64,

    /// Probability in `0.0..=1.0` that any provider call fails
    #[serde(default)]
    pub failure_rate: f64,

    /// Fixed RNG seed for reproducible phone numbers and failures
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            countries_delay_ms: default_countries_delay(),
            numbers_delay_ms: default_numbers_delay(),
            plans_delay_ms: default_plans_delay(),
            register_delay_ms: default_register_delay(),
            pay_delay_ms: default_pay_delay(),
            failure_rate: 0.0,
            seed: None,
        }
    }
}

impl ProviderConfig {
    /// No delays, no failures. Used by tests and scripted runs.
    pub fn instant() -> Self {
        Self {
            countries_delay_ms: 0,
            numbers_delay_ms: 0,
            plans_delay_ms: 0,
            register_delay_ms: 0,
            pay_delay_ms: 0,
            failure_rate: 0.0,
            seed: None,
        }
    }

    pub fn countries_delay(&self) -> Duration {
        Duration::from_millis(self.countries_delay_ms)
    }

    pub fn numbers_delay(&self) -> Duration {
        Duration::from_millis(self.numbers_delay_ms)
    }

    pub fn plans_delay(&self) -> Duration {
        Duration::from_millis(self.plans_delay_ms)
    }

    pub fn register_delay(&self) -> Duration {
        Duration::from_millis(self.register_delay_ms)
    }

    pub fn pay_delay(&self) -> Duration {
        Duration::from_millis(self.pay_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    /// Redraw interval when no input arrives
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `cooee=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file used while the TUI owns the terminal
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_countries_delay() -> u64 {
    300
}

fn default_numbers_delay() -> u64 {
    400
}

fn default_plans_delay() -> u64 {
    200
}

fn default_register_delay() -> u64 {
    600
}

fn default_pay_delay() -> u64 {
    900
}

fn default_tick_rate() -> u64 {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}
