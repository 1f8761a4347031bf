// File: ./src/config.rs
// Site-local keyword vocabulary, loaded from an optional TOML file.
//
// Loaded keywords extend the built-in dictionaries, never replace them. The
// overlay is applied when constructing a `Parser`; the process-wide default
// parser sticks to the built-ins.
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::model::{Category, Priority};

/// Extra keywords for the priority and category dictionaries.
///
/// ```toml
/// [priority]
/// high = ["blocker", "drop everything"]
///
/// [category]
/// work = ["sprint", "retro"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordConfig {
    #[serde(default)]
    pub priority: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub category: HashMap<String, Vec<String>>,
}

impl KeywordConfig {
    fn config_path() -> Option<PathBuf> {
        let proj = ProjectDirs::from("com", "tasklex", "tasklex")?;
        Some(proj.config_dir().join("tasklex.toml"))
    }

    /// Loads the overlay from the standard config location. A missing file
    /// is an empty overlay; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read keyword config: {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("malformed keyword config: {:?}", path))
    }

    /// Converts string-keyed config sections to typed labels, warning on
    /// (and skipping) labels that are not part of the closed vocabulary.
    fn typed<L: FromStr + Eq + Hash>(
        raw: &HashMap<String, Vec<String>>,
        what: &str,
    ) -> HashMap<L, Vec<String>> {
        let mut out = HashMap::new();
        for (label, keywords) in raw {
            match label.to_lowercase().parse::<L>() {
                Ok(key) => {
                    out.insert(key, keywords.clone());
                }
                Err(_) => {
                    log::warn!(
                        "ignoring unknown {} label '{}' in keyword config",
                        what,
                        label
                    );
                }
            }
        }
        out
    }

    pub(crate) fn priority_extras(&self) -> HashMap<Priority, Vec<String>> {
        Self::typed(&self.priority, "priority")
    }

    pub(crate) fn category_extras(&self) -> HashMap<Category, Vec<String>> {
        Self::typed(&self.category, "category")
    }
}
