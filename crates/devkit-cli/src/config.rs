use std::fs;
use std::path::Path;

use anyhow::Context;
use devkit_format::{NormalizerConfig, DEFAULT_MAX_ITERATIONS};
use serde::{Deserialize, Serialize};

/// Settings read from an optional TOML file. Missing keys keep defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevkitConfig {
    /// Indent used by `fmt` when `--indent` is not given.
    pub indent: usize,
    /// Pass budget for `unwrap`.
    pub max_iterations: usize,
    /// Colored text output.
    pub color: bool,
    /// Zone `time` reads input in when `--from` is not given.
    pub time_zone: String,
}

impl Default for DevkitConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            color: true,
            time_zone: "UTC".to_string(),
        }
    }
}

impl DevkitConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn normalizer(&self) -> NormalizerConfig {
        NormalizerConfig::with_max_iterations(self.max_iterations)
    }
}
