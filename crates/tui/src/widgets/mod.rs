//! TUI widgets module.
//!
//! This module contains the panels that make up the dashboard.

pub mod builds;
pub mod console;
pub mod environments;
pub mod pipeline;

pub use console::ConsoleView;
