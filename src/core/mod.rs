//! Core domain logic for pyscript
//!
//! All external interactions (the package installer, the remote catalog)
//! are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Metadata, Dependency, ScriptKind, ScriptVersion)
//! - `services/` - Environments, execution and hub orchestration
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
