//! Simulator handle owning the single active run.
//!
//! The `Simulator` is the interface the UI-facing code talks to. It
//! guards against duplicate runs, spawns the engine task that drives a
//! run to completion, and hands out read-only snapshots of the run
//! state.

use crate::engine::SimEngine;
use crate::state::run::begin_run;
use pb_protocol::ipc::{Event, Op};
use pb_protocol::run_models::RunState;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tokio::sync::Mutex;

/// Owns the run state and coordinates the engine task.
///
/// At most one run is active at a time; `start` while a run is in
/// flight is a no-op. All mutation of the run state flows through the
/// engine task (plus the reset performed under lock in `start`), so
/// observers only ever see consistent snapshots.
pub struct Simulator {
    /// The engine that paces stage transitions.
    engine: Arc<SimEngine>,

    /// The single run's state, shared with the engine task.
    state: Arc<Mutex<RunState>>,

    /// Channel for sending events to the UI.
    events_tx: mpsc::Sender<Event>,

    /// Cancellation flag for the run in flight; replaced on each start.
    cancel_tx: Mutex<watch::Sender<bool>>,
}

impl Simulator {
    /// Create a new Simulator around an engine.
    pub fn new(engine: SimEngine, events_tx: mpsc::Sender<Event>) -> Self {
        let (cancel_tx, _) = watch::channel(false);

        Self {
            engine: Arc::new(engine),
            state: Arc::new(Mutex::new(RunState::new())),
            events_tx,
            cancel_tx: Mutex::new(cancel_tx),
        }
    }

    /// Start a new simulated run in the background.
    ///
    /// No-op if a run is already in progress, so duplicate triggers
    /// can never interleave two timelines. Otherwise the prior run's
    /// results are discarded, the start banner is emitted, and the
    /// engine task takes over until the terminal transition.
    pub async fn start(&self) {
        let mut cancel_rx = {
            let mut run = self.state.lock().await;
            if run.is_running {
                return;
            }

            // Install a fresh cancellation channel before the run is
            // visible as started, so a stale cancel cannot hit it.
            let (cancel_tx, cancel_rx) = watch::channel(false);
            *self.cancel_tx.lock().await = cancel_tx;

            begin_run(&mut run, &self.events_tx).await;
            cancel_rx
        };

        let engine = Arc::clone(&self.engine);
        let state = Arc::clone(&self.state);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            engine.drive(&state, &events_tx, &mut cancel_rx).await;
        });
    }

    /// Cancel the run in flight, if any.
    ///
    /// The engine observes the flag at its next delay boundary and
    /// performs the terminal transition itself; this method only
    /// raises the flag. No-op when idle.
    pub async fn cancel(&self) {
        let _ = self.cancel_tx.lock().await.send(true);
    }

    /// A read-only snapshot of the current run state.
    pub async fn snapshot(&self) -> RunState {
        self.state.lock().await.clone()
    }

    /// Whether a run is currently in flight.
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.is_running
    }

    /// The stage catalog the simulator runs over.
    pub fn catalog(&self) -> &[pb_protocol::StageDefinition] {
        self.engine.catalog()
    }
}

/// Consume operations from the UI until the channel closes or a
/// `Shutdown` arrives. Shutdown cancels any run in flight first.
///
/// The op channel is unbounded so the UI can fire commands from
/// synchronous key handlers without blocking.
pub async fn run_op_loop(simulator: Arc<Simulator>, mut op_rx: mpsc::UnboundedReceiver<Op>) {
    while let Some(op) = op_rx.recv().await {
        match op {
            Op::StartRun => simulator.start().await,
            Op::CancelRun => simulator.cancel().await,
            Op::Shutdown => {
                simulator.cancel().await;
                break;
            }
        }
    }
}
