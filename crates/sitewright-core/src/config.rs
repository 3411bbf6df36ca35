//! Configuration management for Sitewright
//!
//! This module provides configuration structures for run-level Sitewright
//! settings: generation defaults (attempt budget, acceptance target, model),
//! repair thresholds, and icon catalog overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::icons::IconCatalog;
use crate::Result;

/// Run-level Sitewright configuration
///
/// Loaded from `sitewright.toml` in the project root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitewrightConfig {
    /// Generation defaults
    #[serde(default)]
    pub generation: GenerationDefaults,

    /// Repair engine thresholds
    #[serde(default)]
    pub repair: RepairConfig,

    /// Icon allow-list, synonym table and per-kind recommendations
    #[serde(default)]
    pub icons: IconCatalog,
}

/// Default generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationDefaults {
    /// Maximum attempts per component before best-effort acceptance
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Rubric score required for early acceptance
    #[serde(default = "default_target_score")]
    pub target_score: f32,

    /// Model to use for generation calls
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output size per generation call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: usize,

    /// Sampling temperature for generation calls
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Repair engine thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfig {
    /// Artifacts shorter than this receive minimum-content padding
    #[serde(default = "default_min_content_len")]
    pub min_content_len: usize,
}

// Default value providers
fn default_max_attempts() -> u32 {
    3
}

fn default_target_score() -> f32 {
    100.0
}

fn default_model() -> String {
    "sonnet".to_string()
}

fn default_max_output_tokens() -> usize {
    16000
}

fn default_temperature() -> f32 {
    0.7
}

fn default_min_content_len() -> usize {
    400
}

impl SitewrightConfig {
    /// Load configuration from `sitewright.toml` or use defaults
    pub fn load_or_default(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join("sitewright.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Ok(toml::from_str(&content).map_err(|e| {
                crate::SitewrightError::Config(format!("Failed to parse config file: {}", e))
            })?)
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `sitewright.toml`
    pub fn write_default(project_root: &Path) -> Result<()> {
        std::fs::create_dir_all(project_root)?;

        let config_path = project_root.join("sitewright.toml");
        let config = Self::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| crate::SitewrightError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            target_score: default_target_score(),
            model: default_model(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            min_content_len: default_min_content_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SitewrightConfig::default();
        assert_eq!(config.generation.max_attempts, 3);
        assert_eq!(config.generation.target_score, 100.0);
        assert_eq!(config.generation.model, "sonnet");
        assert_eq!(config.repair.min_content_len, 400);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SitewrightConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.generation.max_attempts, 3);
    }

    #[test]
    fn test_write_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        SitewrightConfig::write_default(dir.path()).unwrap();

        let config = SitewrightConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.generation.target_score, 100.0);
        assert!(!config.icons.allowed.is_empty());
    }

    #[test]
    fn test_partial_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sitewright.toml"),
            "[generation]\nmax_attempts = 5\n",
        )
        .unwrap();

        let config = SitewrightConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.generation.max_attempts, 5);
        assert_eq!(config.generation.target_score, 100.0);
    }
}
