use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use activities::config::Config;
use activities::database::ActivityRegistry;
use activities::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env first, so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // 2. Logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    // 3. Activity registry
    let registry = match &config.seed_path {
        Some(path) => ActivityRegistry::from_seed_file(path)
            .with_context(|| format!("loading activities from {}", path.display()))?,
        None => ActivityRegistry::with_default_seed()
            .context("validating built-in activities")?,
    };
    info!(
        activities = registry.len(),
        names = ?registry.names().collect::<Vec<_>>(),
        "Activity registry ready"
    );

    // 4. Router
    let app = web::app_router(Arc::new(registry), &config.static_dir);

    // 5. Serve (with fallback port)
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("parsing HOST/PORT")?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback_port = config.port.checked_add(1).context("no fallback port")?;
            warn!(
                "Could not bind {}: {}. Trying fallback {}:{}",
                addr, e, config.host, fallback_port
            );
            let fallback: SocketAddr = format!("{}:{}", config.host, fallback_port)
                .parse()
                .context("parsing fallback address")?;
            tokio::net::TcpListener::bind(fallback)
                .await
                .context("binding fallback port")?
        }
    };

    let bound_addr = listener.local_addr()?;
    info!("Server running on http://{}", bound_addr);
    info!("Landing page at http://{}{}", bound_addr, web::LANDING_PAGE);

    axum::serve(listener, app).await?;
    Ok(())
}
