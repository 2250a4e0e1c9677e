use std::sync::Arc;

use anyhow::{anyhow, Context};
use scope_probe::{container, logging, web, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("failed to load configuration")?;
    logging::init_tracing(&config.log).map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    let provider = container::build_container(&config).context("failed to initialize singletons")?;
    for descriptor in provider.descriptors() {
        info!(service = descriptor.type_name(), lifetime = %descriptor.lifetime, "registered");
    }

    let app = web::router(Arc::new(provider));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, id_source = ?config.id_source, consumer_lifetime = %config.consumer_lifetime, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed
        std::future::pending::<()>().await;
    }
}
