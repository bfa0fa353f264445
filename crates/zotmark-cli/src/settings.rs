//! Configuration loading.
//!
//! `defaults/zotmark.default.toml` is embedded into the binary. A user file and
//! `ZOTMARK__SECTION__KEY` environment variables are layered on top before
//! deserializing into [`ZotmarkConfig`].

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use zotmark::{Options, UriStyle, Vault, WritePolicy};

const DEFAULT_TOML: &str = include_str!("../defaults/zotmark.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ZotmarkConfig {
    pub log: LogConfig,
    pub convert: ConvertConfig,
    pub vault: VaultConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub item_link_base: String,
}

impl From<&ConvertConfig> for Options {
    fn from(config: &ConvertConfig) -> Self {
        Options {
            item_link_base: config.item_link_base.clone(),
            ..Options::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    pub root: PathBuf,
    pub notes_dir: PathBuf,
    pub name: String,
    pub uri_style: UriStyle,
    pub overwrite: bool,
}

impl VaultConfig {
    pub fn vault(&self) -> Vault {
        Vault::new(&self.root, &self.notes_dir)
    }

    /// Configured vault name, else the last component of the root
    pub fn vault_name(&self) -> Option<String> {
        if self.name.is_empty() {
            let root = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
            Vault::new(root, &self.notes_dir).default_name()
        } else {
            Some(self.name.clone())
        }
    }

    pub fn write_policy(&self) -> WritePolicy {
        if self.overwrite {
            WritePolicy::Overwrite
        } else {
            WritePolicy::CreateNew
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `ZOTMARK__SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        self.builder = self
            .builder
            .add_source(Environment::with_prefix("ZOTMARK").prefix_separator("__").separator("__"));
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ZotmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
