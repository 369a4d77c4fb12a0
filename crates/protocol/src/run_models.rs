//! Runtime run state models.
//!
//! This module defines the structure for tracking the state of a
//! simulated pipeline run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::stage_models::StageStatus;

/// The aggregate state of one simulated pipeline run.
///
/// Each `start()` creates a fresh state with a new run id, discarding
/// any prior run's results. The state is mutated stage-by-stage while
/// `is_running` is true and frozen once the terminal transition clears
/// the flag. The UI only ever sees cloned snapshots of this value.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunState {
    /// Unique identifier for this run.
    pub run_id: Uuid,

    /// Id of the stage currently executing, if any.
    pub active_stage: Option<String>,

    /// Per-stage status, keyed by stage id.
    ///
    /// A stage not yet visited has no entry. Keys are added or
    /// overwritten as the run progresses, never removed mid-run.
    pub statuses: HashMap<String, StageStatus>,

    /// True from `start()` until the terminal transition.
    pub is_running: bool,

    /// Zero-based index of the stage currently (or next) being driven.
    pub current_stage_index: usize,

    /// Append-only console output for this run.
    pub log: Vec<String>,

    /// When this run was started.
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// When this run completed or was cancelled, if it has.
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl RunState {
    /// Create a fresh, not-yet-running state for a new run.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            active_stage: None,
            statuses: HashMap::new(),
            is_running: false,
            current_stage_index: 0,
            log: Vec::new(),
            started_at: chrono::Utc::now(),
            completed_at: None,
        }
    }

    /// Status of a stage, or `None` if the run has not reached it.
    pub fn status_of(&self, stage_id: &str) -> Option<StageStatus> {
        self.statuses.get(stage_id).copied()
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
