//! Token catalog persistence
//!
//! Stores token definitions and toolbar groups in
//! `~/.config/token-template/tokens.yaml`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{builtin_definitions, builtin_groups};
use crate::document::TokenName;
use crate::registry::{TokenDefinition, TokenRegistry, ToolbarGroup};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config directory available")]
    NoConfigDir,
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Token catalog that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "builtin_definitions")]
    pub definitions: BTreeMap<TokenName, TokenDefinition>,
    #[serde(default = "builtin_groups")]
    pub groups: Vec<ToolbarGroup>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            definitions: builtin_definitions(),
            groups: builtin_groups(),
        }
    }
}

impl CatalogConfig {
    /// Load the catalog from disk, or return the built-in one if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::catalog_file() else {
            tracing::debug!("No config directory available, using built-in catalog");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Catalog file not found at {}, using built-in catalog",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded token catalog from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using built-in catalog", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path, reporting every failure
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the catalog to the config directory
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = crate::config_paths::catalog_file().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Saved token catalog to {}", path.display());
        Ok(())
    }

    /// Build a fresh shared registry from this catalog
    pub fn into_registry(self) -> TokenRegistry {
        TokenRegistry::new(self.definitions, self.groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_falls_back_per_field() {
        let yaml = "groups:\n  - label: Only\n    tokens: [ai_role]\n";
        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.definitions, builtin_definitions());
    }

    #[test]
    fn test_invalid_token_name_is_rejected() {
        let yaml = "groups:\n  - label: Bad\n    tokens: ['1abc']\n";
        assert!(serde_yaml::from_str::<CatalogConfig>(yaml).is_err());
    }

    #[test]
    fn test_into_registry() {
        let registry = CatalogConfig::default().into_registry();
        assert!(registry.contains(&TokenName::new("product_name").unwrap()));
        assert_eq!(registry.groups().len(), 4);
    }
}
