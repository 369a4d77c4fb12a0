//! Communication protocol between the TUI and the core simulator.
//!
//! This module defines the message types for asynchronous communication
//! between the TUI (user interface) and the Core (simulation logic).
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: Commands sent from TUI to Core
//! - `Event`: Status updates sent from Core to TUI
//!
//! Communication is asynchronous and channel-based, allowing the UI to
//! remain responsive while the core drives the simulated run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stage_models::StageStatus;

/// Operations sent from the UI (TUI) to the Core logic.
///
/// These represent user commands. The core processes these operations
/// and responds with Events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Start a new simulated pipeline run.
    ///
    /// Ignored if a run is already in progress; at most one run is
    /// active at a time.
    StartRun,

    /// Cancel the run in progress.
    ///
    /// Ignored when no run is active. A pending stage transition is
    /// invalidated and the run moves straight to its terminal state.
    CancelRun,

    /// Shut down the application gracefully.
    Shutdown,
}

/// Events sent from the Core logic to the UI (TUI).
///
/// These represent state changes the UI should reflect to the user.
/// Events for one run arrive in the order the transitions occurred.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A new run has started. Prior run state should be discarded.
    RunStarted { run_id: Uuid },

    /// A stage's status has changed.
    StageStatusUpdate {
        stage_id: String,
        status: StageStatus,
        stage_index: usize,
    },

    /// The run has produced a new console line.
    ///
    /// The TUI should append this to the console display.
    LogLine { content: String },

    /// The run has completed successfully.
    RunCompleted { run_id: Uuid },

    /// The run was cancelled by user request.
    RunCancelled { run_id: Uuid },
}
