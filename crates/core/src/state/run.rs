//! Run state machine transitions.
//!
//! This module provides the functions for moving a `RunState` through
//! its lifecycle, appending console lines and emitting events as it
//! goes. The engine is the only caller during a run, so transitions
//! are never concurrent.

use pb_protocol::ipc::Event;
use pb_protocol::run_models::RunState;
use pb_protocol::stage_models::{StageDefinition, StageStatus};
use tokio::sync::mpsc::Sender;

/// Reset the state for a fresh run and announce it.
///
/// Discards any prior run's statuses and log, flips `is_running`, and
/// appends the start banner. Emits `RunStarted` followed by the banner
/// `LogLine`.
pub async fn begin_run(run: &mut RunState, events_tx: &Sender<Event>) {
    *run = RunState::new();
    run.is_running = true;

    let _ = events_tx
        .send(Event::RunStarted { run_id: run.run_id })
        .await;

    log_line(run, events_tx, "$ Starting pipeline...".to_string()).await;
}

/// Mark a stage as the active, running stage.
///
/// Sets `active_stage`, records the catalog index, flips the stage's
/// status to `Running`, and appends the "Running ..." console line.
pub async fn begin_stage(
    run: &mut RunState,
    stage: &StageDefinition,
    stage_index: usize,
    events_tx: &Sender<Event>,
) {
    run.active_stage = Some(stage.id.clone());
    run.current_stage_index = stage_index;
    run.statuses.insert(stage.id.clone(), StageStatus::Running);

    let _ = events_tx
        .send(Event::StageStatusUpdate {
            stage_id: stage.id.clone(),
            status: StageStatus::Running,
            stage_index,
        })
        .await;

    log_line(
        run,
        events_tx,
        format!("[{}] Running {}...", stage.icon, stage.name),
    )
    .await;
}

/// Mark the active stage as successfully finished.
///
/// The simulator never produces `Failed`; the status map and renderer
/// support it for future extension.
pub async fn finish_stage(
    run: &mut RunState,
    stage: &StageDefinition,
    events_tx: &Sender<Event>,
) {
    run.statuses.insert(stage.id.clone(), StageStatus::Success);

    let _ = events_tx
        .send(Event::StageStatusUpdate {
            stage_id: stage.id.clone(),
            status: StageStatus::Success,
            stage_index: run.current_stage_index,
        })
        .await;

    log_line(
        run,
        events_tx,
        format!("    ✓ {} completed ({})", stage.name, stage.nominal_duration),
    )
    .await;
}

/// Terminal transition: the run finished all stages.
///
/// Clears the active stage, freezes the state, and emits
/// `RunCompleted` after the completion console line.
pub async fn complete_run(run: &mut RunState, events_tx: &Sender<Event>) {
    run.is_running = false;
    run.active_stage = None;
    run.completed_at = Some(chrono::Utc::now());

    log_line(
        run,
        events_tx,
        "✅ Pipeline completed successfully!".to_string(),
    )
    .await;

    let _ = events_tx
        .send(Event::RunCompleted { run_id: run.run_id })
        .await;
}

/// Terminal transition: the run was cancelled mid-flight.
///
/// A stage that was `Running` when cancellation landed keeps that
/// status in the frozen snapshot; no further transitions occur. No-op
/// when the run already reached a terminal state.
pub async fn cancel_run(run: &mut RunState, events_tx: &Sender<Event>) {
    if !run.is_running {
        return;
    }

    run.is_running = false;
    run.active_stage = None;
    run.completed_at = Some(chrono::Utc::now());

    log_line(run, events_tx, "🛑 Pipeline run cancelled.".to_string()).await;

    let _ = events_tx
        .send(Event::RunCancelled { run_id: run.run_id })
        .await;
}

/// Append a console line to the run log and emit it.
pub async fn log_line(run: &mut RunState, events_tx: &Sender<Event>, content: String) {
    run.log.push(content.clone());
    let _ = events_tx.send(Event::LogLine { content }).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn test_stage() -> StageDefinition {
        StageDefinition {
            id: "build".to_string(),
            name: "Build".to_string(),
            icon: "🔨".to_string(),
            nominal_duration: "45s".to_string(),
        }
    }

    #[tokio::test]
    async fn test_begin_run_resets_prior_state() {
        let (tx, mut rx) = mpsc::channel(10);

        let mut run = RunState::new();
        run.statuses
            .insert("stale".to_string(), StageStatus::Success);
        run.log.push("old line".to_string());
        let old_id = run.run_id;

        begin_run(&mut run, &tx).await;

        assert!(run.is_running);
        assert_ne!(run.run_id, old_id);
        assert!(run.statuses.is_empty());
        assert_eq!(run.log, vec!["$ Starting pipeline..."]);

        let event = rx.recv().await.expect("no event");
        assert!(matches!(event, Event::RunStarted { .. }));
        let event = rx.recv().await.expect("no event");
        assert!(matches!(event, Event::LogLine { .. }));
    }

    #[tokio::test]
    async fn test_begin_stage_marks_running() {
        let (tx, mut rx) = mpsc::channel(10);
        let mut run = RunState::new();
        let stage = test_stage();

        begin_stage(&mut run, &stage, 1, &tx).await;

        assert_eq!(run.active_stage.as_deref(), Some("build"));
        assert_eq!(run.current_stage_index, 1);
        assert_eq!(run.status_of("build"), Some(StageStatus::Running));
        assert_eq!(run.log, vec!["[🔨] Running Build..."]);

        let event = rx.recv().await.expect("no event");
        assert!(matches!(
            event,
            Event::StageStatusUpdate {
                status: StageStatus::Running,
                stage_index: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_finish_stage_marks_success_and_logs_duration() {
        let (tx, mut rx) = mpsc::channel(10);
        let mut run = RunState::new();
        let stage = test_stage();

        begin_stage(&mut run, &stage, 0, &tx).await;
        finish_stage(&mut run, &stage, &tx).await;

        assert_eq!(run.status_of("build"), Some(StageStatus::Success));
        assert_eq!(run.log[1], "    ✓ Build completed (45s)");

        // Skip the begin_stage events
        let _ = rx.recv().await;
        let _ = rx.recv().await;
        let event = rx.recv().await.expect("no event");
        assert!(matches!(
            event,
            Event::StageStatusUpdate {
                status: StageStatus::Success,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_complete_run_is_terminal() {
        let (tx, mut rx) = mpsc::channel(10);
        let mut run = RunState::new();
        run.is_running = true;
        run.active_stage = Some("deploy".to_string());

        complete_run(&mut run, &tx).await;

        assert!(!run.is_running);
        assert!(run.active_stage.is_none());
        assert!(run.completed_at.is_some());
        assert_eq!(run.log, vec!["✅ Pipeline completed successfully!"]);

        let _ = rx.recv().await; // LogLine
        let event = rx.recv().await.expect("no event");
        assert!(matches!(event, Event::RunCompleted { .. }));
    }

    #[tokio::test]
    async fn test_cancel_run_freezes_running_stage_status() {
        let (tx, mut rx) = mpsc::channel(10);
        let mut run = RunState::new();
        let stage = test_stage();

        run.is_running = true;
        begin_stage(&mut run, &stage, 0, &tx).await;
        cancel_run(&mut run, &tx).await;

        assert!(!run.is_running);
        assert!(run.active_stage.is_none());
        assert_eq!(run.status_of("build"), Some(StageStatus::Running));
        assert_eq!(run.log[1], "🛑 Pipeline run cancelled.");

        let _ = rx.recv().await; // StageStatusUpdate
        let _ = rx.recv().await; // LogLine (running)
        let _ = rx.recv().await; // LogLine (cancelled)
        let event = rx.recv().await.expect("no event");
        assert!(matches!(event, Event::RunCancelled { .. }));
    }

    #[tokio::test]
    async fn test_cancel_run_after_terminal_is_noop() {
        let (tx, mut rx) = mpsc::channel(10);
        let mut run = RunState::new();

        cancel_run(&mut run, &tx).await;

        assert!(run.log.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
