//! Stage catalog models for `.pipeboard/stages.yaml`.
//!
//! This module defines the structure of the stage catalog that the
//! simulator walks through, plus the per-stage status it reports.

use serde::{Deserialize, Serialize};

/// Immutable definition of a single pipeline stage.
///
/// The catalog is an ordered list of these; the order is the order in
/// which the simulator visits them. Definitions are never mutated at
/// runtime — all per-run information lives in the status map.
///
/// # Example
///
/// ```yaml
/// - id: build
///   name: Build
///   icon: "🔨"
///   nominal-duration: 45s
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StageDefinition {
    /// Unique identifier for this stage. Used as the stable key in the
    /// run's status map.
    pub id: String,

    /// Human-readable display label.
    pub name: String,

    /// Symbol shown next to the stage in the timeline and the console.
    pub icon: String,

    /// Illustrative duration label (e.g. "2m 30s").
    ///
    /// This is a display string only; the simulator paces stages with
    /// its own fixed synthetic delay and never parses this value.
    pub nominal_duration: String,
}

/// Status of a single stage within the current run.
///
/// A stage that has not been visited yet has no entry in the status
/// map; once visited it moves Running -> Success. `Failed` exists for
/// the renderer and future extension, but the simulator never produces
/// it today.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    /// The stage is currently executing.
    Running,

    /// The stage finished successfully.
    Success,

    /// The stage finished with an error.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_definition_yaml_kebab_case() {
        let yaml = r#"
id: test
name: Test
icon: "🧪"
nominal-duration: 2m 30s
"#;
        let stage: StageDefinition =
            serde_yaml::from_str(yaml).expect("Failed to deserialize StageDefinition");
        assert_eq!(stage.id, "test");
        assert_eq!(stage.nominal_duration, "2m 30s");
    }

    #[test]
    fn test_stage_status_json_screaming_snake_case() {
        let json = serde_json::to_string(&StageStatus::Running)
            .expect("Failed to serialize StageStatus");
        assert_eq!(json, "\"RUNNING\"");
    }
}
