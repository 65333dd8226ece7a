use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::gateway::CompletionGateway;
use crate::routes::{self, AppState};

/// Gateway server configuration
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Built browser client to serve at `/`
    pub web_dir: Option<PathBuf>,
}

/// Gateway server instance
pub struct GatewayServer {
    config: ServerConfig,
    gateway: Arc<CompletionGateway>,
}

impl GatewayServer {
    pub fn new(config: ServerConfig, gateway: CompletionGateway) -> Self {
        Self {
            config,
            gateway: Arc::new(gateway),
        }
    }

    /// Routes plus CORS and, when configured, static files for everything else.
    pub fn router(&self) -> Router {
        let mut app = routes::create_router(AppState {
            gateway: self.gateway.clone(),
        });

        if let Some(web_dir) = &self.config.web_dir {
            if web_dir.exists() {
                log::info!("Serving static files from {}", web_dir.display());
                app = app.fallback_service(ServeDir::new(web_dir));
            } else {
                log::warn!("Web dir {} does not exist, not serving static files", web_dir.display());
            }
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        app.layer(cors)
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let app = self.router();

        log::info!("Gateway listening on http://{}", self.config.bind_addr);
        log::info!("   Chat endpoint: http://{}/api/chat", self.config.bind_addr);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
