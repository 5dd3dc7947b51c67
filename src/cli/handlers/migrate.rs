//! `migrate`: apply, list or revert the embedded migrations.

use crate::config::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// `dry_run` lists pending migrations; `rollback` reverts that many.
    /// Otherwise every pending migration is applied.
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = &self.config.database.url;

        if dry_run {
            let pending = pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ Database schema is up to date");
            } else {
                println!("Pending migrations ({}):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
            }
            tracing::info!(count = pending.len(), "Listed pending migrations");
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = revert_migrations(url, steps).await?;
            for name in &reverted {
                println!("✓ Reverted {}", name);
            }
            println!("Rolled back {} migration(s)", reverted.len());
            tracing::info!(requested = steps, reverted = reverted.len(), "Rollback finished");
            return Ok(());
        }

        let applied = run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No pending migrations");
        } else {
            for name in &applied {
                println!("✓ Applied {}", name);
            }
        }
        tracing::info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_missing_database_url_is_rejected_before_connecting() {
        let handler = MigrateCommandHandler::new(Settings::default());

        let err = handler.execute(false, None).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration { ref key, .. } if key == "database.url"));
    }

    #[tokio::test]
    async fn test_zero_rollback_steps_rejected() {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/hdataset".to_string();
        let handler = MigrateCommandHandler::new(config);

        let err = handler.execute(false, Some(0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "rollback"));
    }
}
