use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub mod validator;

pub use validator::{SettingsValidator, ValidationError};

/// Top-level settings, loadable from an optional `mimus.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generation: GenerationSettings,
}

/// Tunables for the recursive generation engine.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationSettings {
    /// Maximum number of nested-object expansions before a field resolves
    /// to null. Collection expansion does not count against this.
    #[serde(default = "default_max_recursion_depth")]
    pub max_recursion_depth: usize,

    /// Inclusive lower bound for collection sizes when a field carries no
    /// count directive
    #[serde(default = "default_count_min")]
    pub default_count_min: usize,

    /// Inclusive upper bound for collection sizes when a field carries no
    /// count directive
    #[serde(default = "default_count_max")]
    pub default_count_max: usize,

    /// Per-call ceiling on generated collection elements. Bounds the width
    /// of collection-of-collection graphs, which have no depth ceiling.
    #[serde(default = "default_max_elements")]
    pub max_elements: usize,

    /// Extra scalar-kind to formatter-name mappings merged into the
    /// provider registry on top of the builtin defaults
    #[serde(default)]
    pub providers: HashMap<String, String>,
}

fn default_max_recursion_depth() -> usize {
    3
}

fn default_count_min() -> usize {
    0
}

fn default_count_max() -> usize {
    10
}

fn default_max_elements() -> usize {
    10_000
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_recursion_depth: default_max_recursion_depth(),
            default_count_min: default_count_min(),
            default_count_max: default_count_max(),
            max_elements: default_max_elements(),
            providers: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_file("mimus.toml")
    }

    /// Load settings from a config file; missing files yield the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .set_default("generation.max_recursion_depth", 3)?
            .set_default("generation.default_count_min", 0)?
            .set_default("generation.default_count_max", 10)?
            .set_default("generation.max_elements", 10_000)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        validator::SettingsValidator::validate(&settings).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;

        Ok(settings)
    }
}
