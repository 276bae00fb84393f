//! Timer template loading and saving
//!
//! Loads timer definitions from TOML files, either a single file or a
//! directory tree. A file holds an optional `[collection]` header and any
//! number of `[[timer]]` entries:
//!
//! ```toml
//! [collection]
//! name = "arena"
//!
//! [[timer]]
//! id = "round"
//! duration_secs = 90.0
//! ```
//!
//! Unreadable or malformed files inside a directory are logged and skipped
//! so one bad file does not block the rest of a collection.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::definition::TimerOptions;
use super::error::ConfigError;

/// Optional `[collection]` header describing a timer file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionHeader {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// On-disk shape of a timer file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TimerFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collection: Option<CollectionHeader>,
    #[serde(default, rename = "timer", skip_serializing_if = "Vec::is_empty")]
    timers: Vec<TimerOptions>,
}

/// Load all timer options from a single TOML file.
pub fn load_timers_from_file(path: &Path) -> Result<Vec<TimerOptions>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let file: TimerFile = toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(file.timers)
}

/// Load all timer options from a directory (recursive).
///
/// A missing directory is treated as empty. Files that fail to load are
/// skipped with a warning.
pub fn load_timers_from_dir(dir: &Path) -> Result<Vec<TimerOptions>, ConfigError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut timers = Vec::new();
    load_timers_recursive(dir, &mut timers)?;
    Ok(timers)
}

fn load_timers_recursive(dir: &Path, timers: &mut Vec<TimerOptions>) -> Result<(), ConfigError> {
    let entries = fs::read_dir(dir).map_err(|source| ConfigError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            load_timers_recursive(&path, timers)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match load_timers_from_file(&path) {
                Ok(file_timers) => timers.extend(file_timers),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping timer file");
                }
            }
        }
    }

    Ok(())
}

/// Save timer options to a single TOML file, creating parent directories.
pub fn save_timers_to_file(timers: &[TimerOptions], path: &Path) -> Result<(), ConfigError> {
    let file = TimerFile {
        collection: None,
        timers: timers.to_vec(),
    };

    let content = toml::to_string_pretty(&file).map_err(ConfigError::Serialize)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// A keyed set of reusable timer templates.
///
/// Templates are options, not live timers: spawning from a template clones
/// the options and resolves them into a fresh timer, so one template can
/// back many concurrent instances.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: HashMap<String, TimerOptions>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add templates keyed by their id, returning the ids that already
    /// existed. With `overwrite` false, existing entries win; with it true,
    /// incoming entries replace them.
    ///
    /// Templates without an id cannot be keyed and are skipped.
    pub fn add_templates(&mut self, templates: Vec<TimerOptions>, overwrite: bool) -> Vec<String> {
        let mut duplicates = Vec::new();

        for options in templates {
            let Some(id) = options.id.clone().filter(|id| !id.is_empty()) else {
                tracing::warn!("Skipping timer template without an id");
                continue;
            };

            if self.templates.contains_key(&id) {
                duplicates.push(id.clone());
                if !overwrite {
                    continue;
                }
            }
            self.templates.insert(id, options);
        }

        duplicates
    }

    pub fn get(&self, id: &str) -> Option<&TimerOptions> {
        self.templates.get(id)
    }

    /// Cloned options for spawning a timer from this template.
    pub fn options(&self, id: &str) -> Option<TimerOptions> {
        self.templates.get(id).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
