//! Configuration loader.
//!
//! Sources are layered over the built-in defaults: a configuration file
//! (explicit, `VOXCHECK_CONFIG`, or the first default location found), then
//! `VOXCHECK_`-prefixed environment variables.

use super::{
    CONFIG_PATH_ENV, ConfigError, DEFAULT_CONFIG_FILES, ENV_PREFIX, NON_CONFIG_ENV_KEYS, Result,
    models::*, validation,
};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::{Path, PathBuf};

/// Extensions accepted for configuration files.
const SUPPORTED_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Layers configuration sources and extracts a validated [`VoxcheckConfig`].
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Start from the built-in defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new().merge(Serialized::defaults(VoxcheckConfig::default())),
            sources: Vec::new(),
        }
    }

    /// Merge a TOML, YAML or JSON file, chosen by extension.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&mut Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileLoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => self.merge(Toml::file(path)),
            Some("yaml") | Some("yml") => self.merge(Yaml::file(path)),
            Some("json") => self.merge(Json::file(path)),
            _ => {
                return Err(ConfigError::FileLoadError(format!(
                    "Unsupported file format: {} (expected one of {})",
                    path.display(),
                    SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
        };

        self.sources.push(path.to_path_buf());
        Ok(self)
    }

    /// Merge the first configuration file found.
    ///
    /// `VOXCHECK_CONFIG` takes precedence and is an error when it names a
    /// file that cannot be loaded. Otherwise the working directory is
    /// searched, then the platform config directory. Finding nothing is not
    /// an error.
    pub fn load_default_files(&mut self) -> Result<&mut Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).unwrap_or_default();
        if !explicit.trim().is_empty() {
            return self.load_file(explicit.trim());
        }

        let platform = directories::ProjectDirs::from("org", "voxcheck", "voxcheck")
            .map(|dirs| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .map(|ext| dirs.config_dir().join(format!("config.{ext}")))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let candidate = DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .chain(platform)
            .find(|path| path.is_file());

        if let Some(path) = candidate {
            self.load_file(&path)?;
            tracing::debug!(path = %path.display(), "Loaded configuration file");
        }

        Ok(self)
    }

    /// Merge `VOXCHECK_`-prefixed environment variables.
    ///
    /// Nested keys are separated by a double underscore, e.g.
    /// `VOXCHECK_DECISION__AUTO_PASS_THRESHOLD=0.8`. Variables owned by the
    /// command line front end are ignored.
    pub fn load_env(&mut self) -> &mut Self {
        self.merge(Env::prefixed(ENV_PREFIX).ignore(NON_CONFIG_ENV_KEYS).split("__"))
    }

    /// Merge any other figment provider.
    pub fn merge<T: figment::Provider>(&mut self, provider: T) -> &mut Self {
        self.figment = std::mem::take(&mut self.figment).merge(provider);
        self
    }

    /// Files merged so far, in load order.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Extract and validate the configuration.
    pub fn extract(&self) -> Result<VoxcheckConfig> {
        let config: VoxcheckConfig = self
            .figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        validation::validate_config(&config)?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
