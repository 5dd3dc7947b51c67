//! Applies command-line overrides on top of file and environment configuration.
//!
//! Precedence, lowest first: config files, `HDATASET_*` variables, global
//! flags (`--verbose`/`--quiet`), then subcommand flags.

use std::path::Path;

use super::parser::{Cli, Commands, Environment};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration, honoring `--config` and `--env`.
    pub fn load(
        config_path: Option<&Path>,
        environment: Option<Environment>,
    ) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(env) = environment {
            loader = loader.with_environment(env.into());
        }
        if let Some(path) = config_path {
            loader = loader.with_config_file(path);
        }

        tracing::debug!(
            environment = %loader.environment(),
            config_dir = %loader.config_dir().display(),
            config_file = ?loader.config_file(),
            "Loading configuration"
        );
        Ok(Self::new(loader.load()?))
    }

    /// Returns a validated copy of the base configuration with CLI overrides applied.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
