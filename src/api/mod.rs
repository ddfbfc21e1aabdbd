//! HTTP API: the chat surface and message relay.
//!
//! One handler reacts to each inbound chat message and produces exactly one
//! outbound message containing the agent's final output. The agent state is
//! built once at startup and shared read-only across requests.

mod types;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::agent::Agent;
use crate::config::Config;

pub use types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};

/// Shared application state.
pub struct AppState {
    pub agent: Agent,
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let state = Arc::new(AppState {
        agent: Agent::new(config),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /chat - the message relay.
///
/// Blocks on the full agent run (tool calls included) and forwards the final
/// output verbatim. An agent failure surfaces as a 500; no partial output is
/// streamed.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let id = Uuid::new_v4();
    info!("Chat turn {} started", id);

    match state.agent.run_message(&request.message).await {
        Ok(reply) => {
            info!("Chat turn {} completed", id);
            Ok(Json(ChatResponse { id, reply }))
        }
        Err(e) => {
            error!("Chat turn {} failed: {:#}", id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("{:#}", e),
                }),
            ))
        }
    }
}
