//! Script dependencies
//!
//! On disk a dependency is a `[name, version]` pair with `""` meaning
//! unpinned. Bare strings (`"rich"`, `"rich==13.0"`) are accepted when
//! reading.

use serde::{Deserialize, Serialize};

/// A third-party package required by a script
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "DependencyRepr", into = "(String, String)")]
pub struct Dependency {
    /// Package name as given to the installer
    pub name: String,
    /// Pinned version, if any
    pub version: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DependencyRepr {
    Pair(String, String),
    Spec(String),
}

impl From<DependencyRepr> for Dependency {
    fn from(repr: DependencyRepr) -> Self {
        match repr {
            DependencyRepr::Pair(name, version) => Self::new(name, Some(version)),
            DependencyRepr::Spec(spec) => {
                Self::parse(&spec).unwrap_or_else(|| Self::new(spec, None))
            },
        }
    }
}

impl From<Dependency> for (String, String) {
    fn from(dep: Dependency) -> Self {
        (dep.name, dep.version.unwrap_or_default())
    }
}

impl Dependency {
    /// Create a dependency; an empty version means unpinned
    #[must_use]
    pub fn new(name: impl Into<String>, version: Option<String>) -> Self {
        let version = version.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            name: name.into().trim().to_string(),
            version,
        }
    }

    /// Create an unpinned dependency
    #[must_use]
    pub fn unpinned(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    /// Parse `pkg`, `pkg=ver` or `pkg==ver`
    ///
    /// Returns `None` for an empty package name.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        let (name, version) = match spec.split_once('=') {
            Some((name, version)) => (name, Some(version.trim_start_matches('=').to_string())),
            None => (spec, None),
        };
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, version))
    }

    /// Parse a whitespace-delimited list of specs
    #[must_use]
    pub fn parse_list<S: AsRef<str>>(specs: &[S]) -> Vec<Self> {
        specs
            .iter()
            .flat_map(|s| s.as_ref().split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter_map(|s| Self::parse(&s))
            .collect()
    }

    /// Requirement string for the installer (`pkg==ver` or `pkg`)
    #[must_use]
    pub fn requirement(&self) -> String {
        match &self.version {
            Some(version) => format!("{}=={version}", self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.requirement())
    }
}
