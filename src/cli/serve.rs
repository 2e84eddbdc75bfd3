//! HTTP server command handler.

use std::net::SocketAddr;

use color_eyre::Result;

use crate::api;
use crate::config::Config;
use crate::context::Context;

use super::{connect, App};

impl App {
    /// Run the REST API until the process is stopped.
    pub async fn run_serve(&self, host: Option<String>, port: Option<u16>) -> Result<()> {
        tracing::info!("Starting game catalog HTTP server");

        let mut config = Config::load()?;
        if let Some(host) = host {
            config.api.host = host;
        }
        if let Some(port) = port {
            config.api.port = port;
        }

        let client = connect(&config).await?;
        let addr_text = format!("{}:{}", config.api.host, config.api.port);
        let public_url = config.api_url();
        let ctx = Context::new(client, config);

        let app = api::router(ctx);

        let listener = tokio::net::TcpListener::bind(&addr_text)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to bind to {}: {}", addr_text, e))?;
        let addr: SocketAddr = listener.local_addr()?;

        tracing::info!("Game catalog listening on http://{} (links use {})", addr, public_url);

        axum::serve(listener, app).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            color_eyre::eyre::eyre!("HTTP server error: {}", e)
        })?;

        tracing::info!("HTTP server shutting down");
        Ok(())
    }
}
