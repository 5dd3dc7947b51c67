//! HTTP server lifecycle: pool, migrations, seeding, serving, shutdown.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::Settings;
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Runs until Ctrl+C or SIGTERM.
    ///
    /// Startup order:
    /// 1. build the connection pool
    /// 2. apply pending migrations when `database.auto_migrate` is set
    /// 3. seed the default row if the table is empty
    /// 4. bind and serve
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = &self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            "Application starting"
        );
        tracing::info!(
            host = %settings.server.host,
            port = settings.server.port,
            request_timeout = settings.server.request_timeout,
            "Server configuration loaded"
        );

        let pool = establish_async_connection_pool(&settings.database)
            .await
            .context("Failed to initialize database connection pool")?;

        if settings.database.auto_migrate {
            let applied = run_pending_migrations(&settings.database.url)
                .await
                .context("Failed to apply database migrations")?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Database migrations applied");
        }

        let state = AppState::new(pool);
        let seeded = state
            .services
            .vegetables
            .ensure_seeded()
            .await
            .context("Failed to seed default data")?;
        if !seeded {
            tracing::debug!("Vegetables table already populated, skipping seed");
        }

        let router = create_router(state, settings.server.request_timeout);

        let address = settings.server.address();
        let listener = TcpListener::bind(&address)
            .await
            .with_context(|| format!("Failed to bind to {}", address))?;
        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
