//! # pb-core
//!
//! Run simulator engine and reference data for pipeboard.
//!
//! This crate provides:
//! - Configuration loading from the `.pipeboard/` directory
//! - The built-in stage catalog and static reference data
//! - The run simulation engine that paces stage transitions
//! - State management for the single active run
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`catalog`]: Built-in stage catalog, build history, and environments
//! - [`engine`]: Run simulation engine
//! - [`state`]: Run state transitions and the simulator handle

pub mod catalog;
pub mod config;
pub mod engine;
pub mod state;
