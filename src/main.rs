use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{Router, middleware};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use halo_manager::{
    config::{HaloConfig, generate_mcp_token},
    mcp::HaloMcpServer,
    server::log_request,
    service::HaloService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HaloConfig::from_env();
    let service = Arc::new(HaloService::new(&config));

    let mut mcp_token = std::env::var("MCP_TOKEN")
        .unwrap_or_default()
        .trim()
        .to_string();
    if mcp_token.is_empty() {
        mcp_token = generate_mcp_token()?;
        warn!("MCP_TOKEN not set, generated: {mcp_token}");
    }

    let mcp_path = format!("/{}/mcp", mcp_token);
    let mcp_server = HaloMcpServer::new(Arc::clone(&service));
    let mcp_service = StreamableHttpService::new(
        move || Ok(mcp_server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let app = Router::new()
        .nest_service(mcp_path.as_str(), mcp_service)
        .layer(middleware::from_fn(log_request));

    let host = std::env::var("WEB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("WEB_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::from((ip, port)),
        Err(_) => SocketAddr::from(([127, 0, 0, 1], port)),
    };

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind http listener on {addr}"))?;
    info!("halo target: {}", service.base_url());
    info!("MCP endpoint: http://{addr}{mcp_path}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("listen for ctrl-c failed: {err}");
            }
        })
        .await
        .context("serve http")?;
    Ok(())
}
