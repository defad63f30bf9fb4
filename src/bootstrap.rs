use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

pub fn init_env() {
    // Missing .env is fine in deployed environments.
    dotenvy::dotenv().ok();
}

pub async fn serve(service_name: &str, app: Router, port: u16) -> Result<()> {
    let app = app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    tracing::info!("{service_name} listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")
}
