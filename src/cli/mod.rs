//! CLI layer for pyscript
//!
//! This module contains the command-line interface:
//!
//! - [`app`] - CLI definitions and entry point
//! - [`commands`] - Command implementations
//! - [`context`] - Layout, config and flags shared by the commands

pub mod app;
pub mod commands;
pub mod context;

// Re-export main entry point
pub use app::run;
pub use context::Cancelled;
