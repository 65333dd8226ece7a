use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use chatdeck_gateway::config::GatewayArgs;
use chatdeck_gateway::server::{GatewayServer, ServerConfig};
use chatdeck_gateway::upstream::OpenAiUpstream;
use chatdeck_gateway::CompletionGateway;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = GatewayArgs::parse();
    let provider = args.provider_config()?;
    let api_key = args.api_key();
    if api_key.is_none() {
        log::warn!("OPENAI_API_KEY is not set; chat requests will be answered with a configuration hint");
    }

    let upstream = OpenAiUpstream::new(&provider)?;
    log::info!(
        "Provider: {} | Model: {} | Upstream: {}",
        provider.provider.label(),
        provider.model,
        upstream.url()
    );

    let gateway = CompletionGateway::new(provider, api_key, Arc::new(upstream));
    let server = GatewayServer::new(
        ServerConfig {
            bind_addr: args.bind,
            web_dir: args.web_dir.clone(),
        },
        gateway,
    );
    server.start().await
}
