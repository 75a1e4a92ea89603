//! Catalog script versions
//!
//! The catalog writes versions either as JSON numbers (`1.2`) or strings
//! (`"1.2.0"`). Two versions are the same release when their dotted
//! numeric components match, ignoring trailing zeros.

use serde::{Deserialize, Serialize};

/// A script version as stored in metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptVersion {
    /// Numeric version (`1.2`)
    Number(serde_json::Number),
    /// Textual version (`"1.2.0"`)
    Text(String),
    /// Anything else the file contained (always invalid)
    Other(serde_json::Value),
}

impl ScriptVersion {
    /// Dotted numeric components with trailing zeros removed, or `None`
    /// if the version is not numeric
    #[must_use]
    pub fn components(&self) -> Option<Vec<u64>> {
        let raw = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().trim_start_matches(['v', 'V']).to_string(),
            Self::Other(_) => return None,
        };
        if raw.is_empty() {
            return None;
        }
        let mut parts = raw
            .split('.')
            .map(|part| part.parse::<u64>().ok())
            .collect::<Option<Vec<_>>>()?;
        while parts.len() > 1 && parts.last() == Some(&0) {
            parts.pop();
        }
        Some(parts)
    }

    /// Whether the version is numeric
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.components().is_some()
    }

    /// Whether both versions denote the same release
    ///
    /// Invalid versions never match anything.
    #[must_use]
    pub fn same_release(&self, other: &Self) -> bool {
        match (self.components(), other.components()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for ScriptVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ScriptVersion {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
