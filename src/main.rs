//! OfficeWhiz - Microsoft Office help chat
//!
//! Serves a chat page whose questions are forwarded to a chat-completion API.
//! Each browser session owns an in-memory transcript; nothing is persisted.

mod api;
mod brand;
mod config;
mod llm;
mod session;
mod state_machine;
mod theme;
mod topic;
mod transcript;

use api::{create_router, AppState};
use config::Config;
use llm::{LoggingGateway, OpenAIGateway};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "officewhiz=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration. A missing key stops the process before anything is served.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            return Err(e.into());
        }
    };

    let gateway = OpenAIGateway::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.base_url,
        config.request_timeout,
    )?;
    let gateway = Arc::new(LoggingGateway::new(Arc::new(gateway)));

    tracing::info!(
        brand = ?config.brand,
        model = %config.model,
        base_url = %config.base_url,
        timeout_secs = config.request_timeout.as_secs(),
        session_ttl_secs = config.session_ttl.as_secs(),
        "Completion gateway initialized"
    );

    let state = AppState::new(config.brand, gateway);

    // End sessions whose browser went away
    let sessions = state.sessions.clone();
    let session_ttl = config.session_ttl;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(session_ttl.min(SESSION_SWEEP_INTERVAL));
        loop {
            ticker.tick().await;
            sessions.evict_idle(session_ttl).await;
        }
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(compression),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("OfficeWhiz server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
