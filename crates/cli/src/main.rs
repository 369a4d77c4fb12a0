//! `pipeboard` binary: launches the dashboard TUI, or runs one
//! simulated pipeline headlessly with `pipeboard run`.

use clap::{Parser, Subcommand};
use colored::Colorize;
use pb_core::config::loader::load_config;
use pb_core::engine::SimEngine;
use pb_core::state::manager::Simulator;
use pb_protocol::Event;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "pipeboard", about = "Simulated CI/CD pipeline dashboard")]
struct Cli {
    /// Directory containing the .pipeboard/ configuration
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one simulated pipeline without the TUI, printing the console log
    Run,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        // Without a subcommand, launch the TUI
        None => pb_tui::run_app(&cli.dir)
            .await
            .map_err(|e| color_eyre::eyre::eyre!(e)),
        Some(Command::Run) => headless_run(&cli.dir).await,
    }
}

/// Drive one run to completion, echoing the console log to stdout.
async fn headless_run(root: &Path) -> color_eyre::Result<()> {
    let config = load_config(root)?;

    let (events_tx, mut events_rx) = mpsc::channel(256);
    let engine = SimEngine::new(config.stages.clone(), &config.global.timing);
    let simulator = Simulator::new(engine, events_tx);

    simulator.start().await;

    while let Some(event) = events_rx.recv().await {
        match event {
            Event::LogLine { content } => println!("{}", colorize_log_line(&content)),
            Event::RunCompleted { .. } | Event::RunCancelled { .. } => break,
            Event::RunStarted { .. } | Event::StageStatusUpdate { .. } => {}
        }
    }

    Ok(())
}

/// Color console lines by what they announce.
fn colorize_log_line(line: &str) -> String {
    if line.starts_with('$') {
        line.bold().to_string()
    } else if line.starts_with('✅') || line.trim_start().starts_with('✓') {
        line.green().to_string()
    } else if line.starts_with('🛑') {
        line.red().to_string()
    } else {
        line.to_string()
    }
}
