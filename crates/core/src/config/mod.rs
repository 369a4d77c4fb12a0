//! Configuration loading and management.
//!
//! This module provides functionality to load and parse configuration
//! files from the `.pipeboard/` directory structure.

pub mod error;
pub mod loader;
pub mod models;
