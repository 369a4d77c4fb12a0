//! Configuration data structures.

use pb_protocol::StageDefinition;
use serde::{Deserialize, Serialize};

use crate::catalog;

/// Global settings from `.pipeboard/config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Timing overrides for the simulated run.
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Synthetic pacing for the simulated run.
///
/// These are presentation delays, not measurements; the per-stage
/// `nominal-duration` labels in the catalog are unrelated to them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TimingConfig {
    /// Delay before the first stage begins, in milliseconds.
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,

    /// Synthetic execution time for each stage, in milliseconds.
    #[serde(default = "default_stage_delay_ms")]
    pub stage_delay_ms: u64,
}

fn default_start_delay_ms() -> u64 {
    500
}

fn default_stage_delay_ms() -> u64 {
    800
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay_ms(),
            stage_delay_ms: default_stage_delay_ms(),
        }
    }
}

/// All configuration the application needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Global settings.
    pub global: GlobalConfig,

    /// Ordered stage catalog for the simulated run.
    pub stages: Vec<StageDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            stages: catalog::default_stages(),
        }
    }
}
