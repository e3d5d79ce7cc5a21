//! Chat web UI server.
//!
//! Serves a single chat page and a JSON endpoint that runs the agent.

use super::build_agent;
use crate::agent::{Agent, AgentResponse};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::model::ChatTurn;
use crate::WebAgentError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

const INDEX_HTML: &str = include_str!("chat.html");

/// Shared application state.
pub struct AppState {
    agent: Agent,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

/// Build the router for the chat UI.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .layer(cors)
        .with_state(state)
}

/// Run the chat web UI server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Agent, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'webagent doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let agent = build_agent(&settings)?;
    let name = agent.name().to_string();
    let app = router(Arc::new(AppState::new(agent)));

    let addr = format!("{}:{}", host, port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            Output::info("Pick another address with --host/--port or [server] in the config file.");
            return Err(WebAgentError::Server(format!("cannot listen on {}: {}", addr, e)).into());
        }
    };

    Output::header(&format!("{} Chat", name));
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Chat UI", "GET  /");
    Output::kv("Chat", "POST /api/chat");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");
    info!("Chat UI listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
    /// Earlier turns as `{role, content}` objects.
    #[serde(default)]
    history: Vec<ChatTurn>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "agent": state.agent.name(),
        "model": state.agent.model_id(),
    }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> axum::response::Response {
    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let response: AgentResponse = state.agent.run(message, &req.history).await;
    Json(response).into_response()
}
