//! Business logic services
//!
//! Orchestration over the stores and the port traits. Real I/O against the
//! outside world (processes, network) only happens through the ports.
//!
//! - [`environment`] - Per-script environments
//! - [`runner`] - Script execution
//! - [`hub`] - Catalog downloads and updates

pub mod environment;
pub mod hub;
pub mod runner;

pub use environment::{EnvManager, Prepared, Uninstalled};
pub use hub::{DownloadOutcome, Hub, StandardScript, UpdateCheck, is_not_found};
pub use runner::{Launch, ScriptRunner, execute};
