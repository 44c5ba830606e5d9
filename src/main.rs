mod routes;
mod models;
mod prompt;
mod hf;
mod history;

use axum::{Router, routing::{post, get}};
use routes::{index, status, create_session, generate, list_history, clear_history, download_generation, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use std::sync::Arc;
use tower_http::cors::{CorsLayer, Any};

use crate::hf::HfClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let token = std::env::var("HF_TOKEN").unwrap_or_default();
    let client = HfClient::new(token.clone());
    let token_configured = client.token_configured();
    if token_configured {
        tracing::info!("Using token: {}...", &token[..std::cmp::min(10, token.len())]);
    } else {
        tracing::warn!("⚠️ HF_TOKEN missing or placeholder; generation is disabled until a token is configured");
    }

    let state = AppState {
        sessions: Arc::default(),
        backend: Arc::new(client),
        token_configured,
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/api/status", get(status))
        .route("/api/session", post(create_session))
        .route("/api/generate", post(generate))
        .route("/api/history/:session_id", get(list_history).delete(clear_history))
        .route("/api/history/:session_id/:generation_id/download", get(download_generation))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0,0,0,0], port));
    tracing::info!(%addr, "Starting server");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
