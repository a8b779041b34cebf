//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port
//! and to wire up the price feed behind the analytics endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use adapter_marketstack::client::MarketstackClient;
use adapter_marketstack::source::EodSource;
use adapter_marketstack::synthetic::GbmSource;

use crate::config::ServerConfig;
use crate::routes;

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a new server instance with the given configuration
    ///
    /// The price feed is the live Marketstack client when an access key is
    /// configured, otherwise a seeded synthetic feed so the dashboard still
    /// works offline.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_source(config, default_source())
    }

    /// Create a new server instance with an explicit price feed
    pub fn with_source(config: ServerConfig, source: Arc<dyn EodSource>) -> Self {
        let config = Arc::new(config);
        let router = routes::build_router(config.clone(), source);

        Self { config, router }
    }

    /// Get the socket address the server will bind to
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server
    ///
    /// This is the main entry point for starting the server.
    /// It binds to the configured host/port and serves requests.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Run the server with a specific listener
    ///
    /// This is useful for testing where you want to use a listener bound to port 0
    /// to get a random available port.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router).await
    }

    /// Create a test server and return the bound address
    ///
    /// This binds to port 0 to get a random available port, starts the server
    /// in a background task, and returns the actual bound address. The server
    /// runs against the synthetic feed so tests never touch the network.
    #[cfg(test)]
    pub async fn spawn_test_server(
        config: ServerConfig,
    ) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = Self::with_source(config, Arc::new(GbmSource::default()));
        let handle = tokio::spawn(async move {
            server.run_with_listener(listener).await.ok();
        });

        // Give the server a moment to start
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        (addr, handle)
    }
}

/// Pick the price feed for a new server
fn default_source() -> Arc<dyn EodSource> {
    match MarketstackClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::warn!(%err, "Marketstack feed unavailable, serving synthetic data");
            Arc::new(GbmSource::default())
        }
    }
}
