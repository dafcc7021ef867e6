//! Web server for filedrop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::rate_limit::{FixedWindowLimiter, RateLimitConfig};
use crate::storage::FileStore;
use crate::{FiledropError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_openapi_router, create_router};

/// Web server for the file API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
    /// Interval between rate limiter sweeps.
    sweep_interval: Duration,
}

impl WebServer {
    /// Create a new web server from configuration.
    ///
    /// Initializes the file store (creating the storage directory if
    /// needed) and the download rate limiter.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| FiledropError::Config(format!("invalid server address: {e}")))?;

        let store = FileStore::new(&config.storage.path)?;
        tracing::info!("File storage initialized at: {}", config.storage.path);

        let limiter = Arc::new(FixedWindowLimiter::new(RateLimitConfig::new(
            config.rate_limit.max_requests,
            config.rate_limit.window_secs,
        )));

        let app_state = Arc::new(AppState::new(
            store,
            limiter,
            config.storage.max_upload_size(),
        ));

        Ok(Self {
            addr,
            app_state,
            cors_origins: config.server.cors_origins.clone(),
            sweep_interval: Duration::from_secs(config.rate_limit.sweep_interval_secs),
        })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> axum::Router {
        create_router(self.app_state.clone(), &self.cors_origins)
            .merge(create_health_router())
            .merge(create_openapi_router())
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the rate limiter sweep after a successful bind.
        self.app_state
            .limiter
            .clone()
            .start_cleanup_task(self.sweep_interval);

        tracing::info!("Server running at http://{}", local_addr);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        self.app_state
            .limiter
            .clone()
            .start_cleanup_task(self.sweep_interval);

        tracing::info!("Server running at http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
