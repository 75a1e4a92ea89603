//! Script metadata record
//!
//! One JSON object per script. Fields this crate does not know about are
//! kept in [`Metadata::extra`] so read-modify-write cycles never drop them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{Dependency, ScriptKind, ScriptVersion};

/// Category shown for scripts without one
pub const CUSTOM_CATEGORY: &str = "custom";

/// Metadata of a script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Script name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// One-line (or longer) description shown by `list`
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Third-party packages the script imports
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<Dependency>,
    /// Provenance
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ScriptKind,
    /// Catalog category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Catalog version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ScriptVersion>,
    /// Unknown fields, preserved as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Metadata {
    /// Build a custom script record from explicit values
    #[must_use]
    pub fn generate(
        name: impl Into<String>,
        description: impl Into<String>,
        dependencies: Vec<Dependency>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            dependencies,
            ..Self::default()
        }
    }

    /// Fill fields that must always be present
    ///
    /// `dependencies` and `type` already default during deserialization;
    /// only the name depends on context.
    pub fn complete(&mut self, name: &str) {
        if self.name.trim().is_empty() {
            self.name = name.to_string();
        }
    }

    /// Whether the script came from the catalog
    #[must_use]
    pub fn is_standard(&self) -> bool {
        self.kind == ScriptKind::Standard
    }

    /// Category used for grouping (`custom` when absent)
    #[must_use]
    pub fn category_or_custom(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(CUSTOM_CATEGORY)
    }

    /// Overwrite top-level fields with `fields`, keeping everything else
    pub fn merge(&mut self, fields: Map<String, Value>) -> Result<(), serde_json::Error> {
        let mut current = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in fields {
            current.insert(key, value);
        }
        *self = serde_json::from_value(Value::Object(current))?;
        Ok(())
    }
}
