//! Main entry point for the pb-tui binary.
//!
//! This executable provides a standalone TUI for pipeboard.

use anyhow::Result;
use pb_tui::run_app;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from the current directory and run the TUI
    run_app(Path::new(".")).await
}
