use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};
use crate::vault::{CorruptPolicy, StoreConfig};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Sealed vault file (relative paths resolve against the project dir).
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Raw key file (relative paths resolve against the project dir).
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// What to do with a data file that fails to load.
    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_file() -> String {
    "passwords.vault".to_string()
}

fn default_key_file() -> String {
    "vault.key".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            key_file: default_key_file(),
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the configured files against `project_dir`.
    ///
    /// Absolute paths are kept as they are.
    pub fn store_config(&self, project_dir: &Path) -> StoreConfig {
        StoreConfig::new(
            project_dir.join(&self.data_file),
            project_dir.join(&self.key_file),
        )
        .with_corrupt_policy(self.on_corrupt)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
