//! `serve`: run the HTTP server, or only check the configuration.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }
        Server::new(self.config).run().await
    }

    /// Checks the configuration without touching the network or the database.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..{} connections, auto_migrate={}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            self.config.database.auto_migrate
        );
        println!("✓ Log level: {}", self.config.logger.level);
        println!("Dry run completed successfully");

        tracing::info!(address = %self.config.server.address(), "Dry run completed");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
