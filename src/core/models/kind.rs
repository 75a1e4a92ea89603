//! Script provenance
//!
//! Defines where a script came from.

use serde::{Deserialize, Serialize};

/// Script provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// Downloaded from the catalog
    Standard,
    /// Added by the user (also used for unknown values)
    #[default]
    #[serde(other)]
    Custom,
}
