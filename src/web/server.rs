//! Web server for files-manager.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::db::SessionCache;
use crate::{FilesError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &ServerConfig, app_state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| {
                FilesError::Config(format!(
                    "invalid server address {}:{}: {e}",
                    config.host, config.port
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.cors_origins.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    ///
    /// Expired sessions are already invisible to lookups; this only reclaims
    /// their rows once an hour.
    fn start_session_cleanup_task(cache: Arc<dyn SessionCache>) {
        tokio::spawn(async move {
            const CLEANUP_INTERVAL_SECS: u64 = 3600;

            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                match cache.purge_expired().await {
                    Ok(count) if count > 0 => {
                        tracing::info!(deleted_count = count, "Cleaned up expired sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("No expired sessions to clean up");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to cleanup expired sessions");
                    }
                }
            }
        });
    }

    async fn bind(self) -> std::io::Result<(TcpListener, axum::Router)> {
        let cache = self.app_state.stores.cache.clone();
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start cleanup only after a successful bind
        Self::start_session_cleanup_task(cache);
        tracing::info!("Session cleanup task started (runs every hour)");

        tracing::info!("Web server listening on http://{}", local_addr);

        Ok((listener, router))
    }

    /// Run the web server.
    pub async fn run(self) -> std::io::Result<()> {
        let (listener, router) = self.bind().await?;
        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let (listener, router) = self.bind().await?;
        let local_addr = listener.local_addr()?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
