//! Configuration for the extraction engine.

use serde::{Deserialize, Serialize};

/// Tunable parameters of the extraction engine.
///
/// The replay thresholds were chosen empirically; they are configuration
/// rather than constants so deployments can tune them against their own
/// correction histories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum Jaccard similarity for whole-record replay (0.0 - 1.0).
    pub similarity_threshold: f32,

    /// Minimum tokens shared between the current text and a stored source
    /// text for per-field replay.
    pub min_shared_tokens: usize,

    /// Oldest issue year accepted by date validation.
    pub min_year: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.70,
            min_shared_tokens: 5,
            min_year: 2000,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
