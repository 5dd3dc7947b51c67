//! Layered configuration loading
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `HDATASET_*` environment variables, `__` separating nested keys
//!
//! Setting `HDATASET_CONFIG_FILE` replaces steps 1 to 3 with a single file.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "HDATASET_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "HDATASET_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "HDATASET";
const ENV_SEPARATOR: &str = "__";

type Builder = ConfigBuilder<DefaultState>;

/// Resolves where configuration lives and merges all sources into `Settings`
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: Environment,
}

impl ConfigLoader {
    /// Builds a loader from `HDATASET_CONFIG_DIR`, `HDATASET_CONFIG_FILE` and
    /// `HDATASET_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails when both the directory and the single-file variable are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if dir_var.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(format!(
                "{} and {} cannot both be set; pick a layered directory or a single file",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: Environment::from_env(),
        })
    }

    /// Replace the environment picked up from `HDATASET_APP_ENV`.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Load a single file, bypassing the layered directory.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Merge every source, deserialize and validate.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self
            .build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.config_file {
            Some(file) => add_file(Config::builder(), file, true)?,
            None => self.layered(Config::builder())?,
        };

        let env_source = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true);

        builder.add_source(env_source).build().map_err(ConfigError::from)
    }

    fn layered(&self, builder: Builder) -> Result<Builder, ConfigError> {
        let builder = add_file(builder, &self.config_dir.join("default.toml"), true)?;
        let builder = add_file(
            builder,
            &self.config_dir.join(self.environment.overlay_file_name()),
            false,
        )?;
        add_file(builder, &self.config_dir.join("local.toml"), false)
    }
}

fn add_file(builder: Builder, path: &Path, required: bool) -> Result<Builder, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    let name = path
        .to_str()
        .ok_or_else(|| ConfigError::ParseError(format!("Non UTF-8 path: {}", path.display())))?;

    Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
}
