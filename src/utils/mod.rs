//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with security filters.

pub mod logging;
