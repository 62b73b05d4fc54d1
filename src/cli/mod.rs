// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for rendering pose keypoints.
//!
//! This module contains the command-line interface logic: argument parsing,
//! colored console logging and the `draw`, `dwpose` and `select` commands.

// Modules
/// CLI arguments.
pub mod args;

/// Command implementations.
pub mod draw;

/// Console logging macros and verbosity switch.
pub mod logging;
