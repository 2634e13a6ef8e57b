//! TOML configuration for where DeskDB finds its source files.
//!
//! ```toml
//! data_dir = "/srv/desk"
//!
//! [cases]
//! pattern = "ticket-export-*.json"
//! ```
//!
//! Every key is optional; omitted keys fall back to the default layout.


use deskdb_core::{
    db::{JsonDirSource, SourceLayout},
    model::EntityTag,
};
use globset::Glob;
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// CONSTANTS
///

/// Base directory used when neither the config nor the command line sets one.
pub const DEFAULT_DATA_DIR: &str = "data";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

///
/// SourceConfig
/// Per-variant override; unset keys use the variant's default layout.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub dir: Option<PathBuf>,
    pub pattern: Option<String>,
}

impl SourceConfig {
    #[must_use]
    pub fn resolve(&self, tag: EntityTag) -> SourceLayout {
        let default = SourceLayout::default_for(tag);

        SourceLayout {
            dir: self.dir.clone().unwrap_or(default.dir),
            pattern: self.pattern.clone().unwrap_or(default.pattern),
        }
    }
}

///
/// DeskConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    pub data_dir: PathBuf,
    pub organizations: SourceConfig,
    pub accounts: SourceConfig,
    pub cases: SourceConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            organizations: SourceConfig::default(),
            accounts: SourceConfig::default(),
            cases: SourceConfig::default(),
        }
    }
}

impl DeskConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), data_dir = %config.data_dir.display(), "config loaded");

        Ok(config)
    }

    /// Replace the base directory (command-line override).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    #[must_use]
    pub const fn source_config(&self, tag: EntityTag) -> &SourceConfig {
        match tag {
            EntityTag::Organization => &self.organizations,
            EntityTag::Account => &self.accounts,
            EntityTag::Case => &self.cases,
        }
    }

    /// Effective layout for one variant.
    #[must_use]
    pub fn layout(&self, tag: EntityTag) -> SourceLayout {
        self.source_config(tag).resolve(tag)
    }

    /// Check every resolved layout: directories must be non-empty and
    /// patterns must compile as globs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                key: "data_dir".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        for tag in EntityTag::ALL {
            let section = section_name(tag);
            let layout = self.layout(tag);

            if layout.dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid {
                    key: format!("{section}.dir"),
                    reason: "must not be empty".to_string(),
                });
            }
            if layout.pattern.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: format!("{section}.pattern"),
                    reason: "must not be empty".to_string(),
                });
            }
            if let Err(err) = Glob::new(&layout.pattern) {
                return Err(ConfigError::Invalid {
                    key: format!("{section}.pattern"),
                    reason: err.to_string(),
                });
            }
        }

        Ok(())
    }

    /// File-discovery source for this configuration.
    #[must_use]
    pub fn source(&self) -> JsonDirSource {
        EntityTag::ALL
            .into_iter()
            .fold(JsonDirSource::new(&self.data_dir), |source, tag| {
                source.with_layout(tag, self.layout(tag))
            })
    }
}

// TOML table name for a variant.
const fn section_name(tag: EntityTag) -> &'static str {
    match tag {
        EntityTag::Organization => "organizations",
        EntityTag::Account => "accounts",
        EntityTag::Case => "cases",
    }
}
