//! Run state management.
//!
//! This module provides the state transition functions for a simulated
//! run and the `Simulator` handle that owns the single active run.

pub mod manager;
pub mod run;
