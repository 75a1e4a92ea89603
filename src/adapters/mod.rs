//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `pip/` - environments and packages via `python -m venv` and `pip`
//! - `http/` - the remote script catalog over HTTP

pub mod http;
pub mod pip;

pub use http::HttpCatalog;
pub use pip::{PipInstaller, system_python};
