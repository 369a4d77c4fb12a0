//! # pb-tui
//!
//! Terminal User Interface for pipeboard.
//!
//! This crate provides the interactive dashboard for the simulated
//! CI/CD pipeline. It communicates with `pb-core` via channels using
//! the `Op` and `Event` protocol defined in `pb-protocol`.

use anyhow::Result;
use pb_core::catalog;
use pb_core::config::loader::load_config;
use pb_core::engine::SimEngine;
use pb_core::state::manager::{run_op_loop, Simulator};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

pub mod app;
pub mod event_handler;
pub mod tui;
pub mod widgets;

pub use app::App;
pub use tui::Tui;

/// Wire up the core simulator and run the TUI until the user quits.
///
/// `root` is the directory whose `.pipeboard/` configuration (if any)
/// supplies the stage catalog and timing.
pub async fn run_app(root: &Path) -> Result<()> {
    let config = load_config(root)?;

    let (events_tx, events_rx) = mpsc::channel(256);
    let (op_tx, op_rx) = mpsc::unbounded_channel();

    let engine = SimEngine::new(config.stages.clone(), &config.global.timing);
    let simulator = Arc::new(Simulator::new(engine, events_tx));
    tokio::spawn(run_op_loop(Arc::clone(&simulator), op_rx));

    let mut tui = Tui::init()?;
    let mut app = App::new(
        config.stages,
        catalog::build_history(),
        catalog::environments(),
        op_tx,
        events_rx,
    );

    let result = app.run(&mut tui).await;
    tui.restore()?;
    result
}
