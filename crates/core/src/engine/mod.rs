//! Run simulation engine.
//!
//! The `SimEngine` drives one simulated run through its stages with
//! synthetic pacing. It is the only mutator of `RunState` while a run
//! is in flight: every transition happens inside this loop, in catalog
//! order, one stage at a time.

use crate::config::models::TimingConfig;
use crate::state::run::{begin_stage, cancel_run, complete_run, finish_stage};
use pb_protocol::ipc::Event;
use pb_protocol::run_models::RunState;
use pb_protocol::stage_models::StageDefinition;
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio::sync::Mutex;

/// Drives stage transitions for simulated runs over a fixed catalog.
///
/// The engine holds no run state of its own; callers hand it the
/// shared `RunState` for the duration of one run. Delays come from
/// `tokio::time`, so tests can fast-forward them with a paused clock.
pub struct SimEngine {
    catalog: Vec<StageDefinition>,
    start_delay: Duration,
    stage_delay: Duration,
}

impl SimEngine {
    /// Create a new engine over the given catalog and pacing.
    pub fn new(catalog: Vec<StageDefinition>, timing: &TimingConfig) -> Self {
        Self {
            catalog,
            start_delay: Duration::from_millis(timing.start_delay_ms),
            stage_delay: Duration::from_millis(timing.stage_delay_ms),
        }
    }

    /// The stage catalog this engine walks.
    pub fn catalog(&self) -> &[StageDefinition] {
        &self.catalog
    }

    /// Drive one run to its terminal transition.
    ///
    /// The caller must have already applied `begin_run` to `state`.
    /// Stages are visited strictly in catalog order with no overlap:
    /// each becomes `Running`, waits the per-stage delay, becomes
    /// `Success`, and only then is the next stage considered. An empty
    /// catalog reaches the terminal transition straight after the
    /// initial delay.
    ///
    /// Cancellation is cooperative: the token is checked at every
    /// delay, never mid-mutation, so a cancelled run is left in a
    /// consistent frozen state.
    pub async fn drive(
        &self,
        state: &Mutex<RunState>,
        events_tx: &Sender<Event>,
        cancel_rx: &mut watch::Receiver<bool>,
    ) {
        if delay_or_cancel(self.start_delay, cancel_rx).await {
            let mut run = state.lock().await;
            cancel_run(&mut run, events_tx).await;
            return;
        }

        for (stage_index, stage) in self.catalog.iter().enumerate() {
            {
                let mut run = state.lock().await;
                begin_stage(&mut run, stage, stage_index, events_tx).await;
            }

            if delay_or_cancel(self.stage_delay, cancel_rx).await {
                let mut run = state.lock().await;
                cancel_run(&mut run, events_tx).await;
                return;
            }

            {
                let mut run = state.lock().await;
                finish_stage(&mut run, stage, events_tx).await;
            }
        }

        let mut run = state.lock().await;
        complete_run(&mut run, events_tx).await;
    }
}

/// Sleep for `delay`, returning early with `true` if cancellation
/// lands first. Also treats a dropped cancellation sender as a
/// cancellation, so an abandoned run cannot keep ticking.
async fn delay_or_cancel(delay: Duration, cancel_rx: &mut watch::Receiver<bool>) -> bool {
    tokio::select! {
        () = tokio::time::sleep(delay) => false,
        _ = cancel_rx.wait_for(|cancelled| *cancelled) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_stages;
    use crate::state::run::begin_run;
    use pb_protocol::stage_models::StageStatus;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_engine(catalog: Vec<StageDefinition>) -> SimEngine {
        SimEngine::new(catalog, &TimingConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_completes_all_stages() {
        let engine = test_engine(default_stages());
        let state = Arc::new(Mutex::new(RunState::new()));
        let (tx, mut rx) = mpsc::channel(256);
        let (_cancel_tx, mut cancel_rx) = watch::channel(false);

        {
            let mut run = state.lock().await;
            begin_run(&mut run, &tx).await;
        }
        engine.drive(&state, &tx, &mut cancel_rx).await;

        let run = state.lock().await;
        assert!(!run.is_running);
        assert!(run.active_stage.is_none());
        for stage in engine.catalog() {
            assert_eq!(run.status_of(&stage.id), Some(StageStatus::Success));
        }

        // Drain events; the last one must be RunCompleted.
        let mut last = None;
        while let Ok(event) = rx.try_recv() {
            last = Some(event);
        }
        assert!(matches!(last, Some(Event::RunCompleted { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drive_empty_catalog_reaches_terminal() {
        let engine = test_engine(Vec::new());
        let state = Arc::new(Mutex::new(RunState::new()));
        let (tx, _rx) = mpsc::channel(16);
        let (_cancel_tx, mut cancel_rx) = watch::channel(false);

        {
            let mut run = state.lock().await;
            begin_run(&mut run, &tx).await;
        }
        engine.drive(&state, &tx, &mut cancel_rx).await;

        let run = state.lock().await;
        assert!(!run.is_running);
        assert!(run.statuses.is_empty());
        assert_eq!(
            run.log,
            vec!["$ Starting pipeline...", "✅ Pipeline completed successfully!"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_or_cancel_sees_prior_cancellation() {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        cancel_tx.send(true).expect("send failed");

        let cancelled = delay_or_cancel(Duration::from_secs(60), &mut cancel_rx).await;
        assert!(cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_or_cancel_elapses_without_cancellation() {
        let (_cancel_tx, mut cancel_rx) = watch::channel(false);

        let cancelled = delay_or_cancel(Duration::from_millis(800), &mut cancel_rx).await;
        assert!(!cancelled);
    }
}
