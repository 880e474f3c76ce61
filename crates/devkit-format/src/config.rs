//! Normalizer configuration.

use serde::{Deserialize, Serialize};

/// Pass budget used by [`parse_stringified`](crate::parse_stringified).
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Configuration for the stringified-JSON normalizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Maximum number of parse passes before giving up.
    pub max_iterations: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl NormalizerConfig {
    /// A configuration with a custom pass budget.
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}
