//! # pb-protocol
//!
//! Core protocol definitions and data models for pipeboard.
//!
//! This crate defines all shared data structures used for:
//! - Stage catalog entries parsed from `.pipeboard/stages.yaml`
//! - Runtime run state tracked by the simulator
//! - Static build-history and environment reference data
//! - Communication between the TUI and the core simulator
//!
//! ## Modules
//!
//! - [`stage_models`]: Stage definitions and per-stage status
//! - [`run_models`]: Runtime run state and its snapshot
//! - [`reference_models`]: Build history and environment records
//! - [`ipc`]: Operations and Events for Core-TUI communication
//!
//! ## Design Principles
//!
//! - Minimal dependencies: only serde, uuid, and chrono
//! - Independent compilation: no dependencies on other pipeboard crates

pub mod ipc;
pub mod reference_models;
pub mod run_models;
pub mod stage_models;

// Re-export all public types for convenience
pub use ipc::*;
pub use reference_models::*;
pub use run_models::*;
pub use stage_models::*;
