mod analyze;
mod config;
mod embeddings;
mod errors;
mod extract;
mod matching;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embeddings::MiniLmEmbedder;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    if !config.job_roles_dir.is_dir() {
        warn!(
            "Job roles dir {} does not exist; /job_roles/ and tfidf analysis will fail",
            config.job_roles_dir.display()
        );
    }

    // Load the embedding model once; every request shares it read-only
    let (model_id, revision) = (
        config.embedding_model.clone(),
        config.embedding_revision.clone(),
    );
    let embedder = tokio::task::spawn_blocking(move || MiniLmEmbedder::load(&model_id, &revision))
        .await
        .context("Embedding model loader panicked")??;

    let state = AppState::new(config.clone(), Arc::new(embedder));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
