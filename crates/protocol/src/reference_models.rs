//! Static reference data shown alongside the pipeline.
//!
//! Build-history records and deployment environments are read-only
//! display data supplied wholesale by the core. The simulator never
//! touches them; the TUI only renders them and reports selections.

use serde::{Deserialize, Serialize};

/// Outcome of a historical build.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    /// The build finished successfully.
    Success,

    /// The build finished with an error.
    Failed,
}

/// One entry in the build-history list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    /// Build number, unique and descending in the displayed list.
    pub number: u32,

    /// Branch the build ran against.
    pub branch: String,

    /// Final outcome of the build.
    pub status: BuildStatus,

    /// Short commit hash.
    pub commit: String,

    /// Relative display time (e.g. "2 hours ago").
    pub time: String,

    /// Illustrative wall-clock duration label.
    pub duration: String,
}

/// One deployment environment card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Unique identifier (e.g. "staging").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Deployment status label.
    pub status: String,

    /// Version currently deployed.
    pub version: String,

    /// Hostname serving this environment.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_record_round_trips_through_json() {
        let record = BuildRecord {
            number: 42,
            branch: "main".to_string(),
            status: BuildStatus::Success,
            commit: "a1b2c3d".to_string(),
            time: "5 min ago".to_string(),
            duration: "5m 45s".to_string(),
        };

        let json = serde_json::to_string(&record).expect("Failed to serialize BuildRecord");
        let deserialized: BuildRecord =
            serde_json::from_str(&json).expect("Failed to deserialize BuildRecord");
        assert_eq!(deserialized, record);
    }
}
