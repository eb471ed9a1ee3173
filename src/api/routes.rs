//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::ledger::LedgerCredentials;
use crate::session::Session;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Session built once from the environment; used whenever a request
    /// does not override the operator credentials
    pub session: Session,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let session = Session::new(&config);

    let state = Arc::new(AppState {
        config: config.clone(),
        session,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/chat", post(chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    #[serde(rename = "privateKey")]
    pub private_key: Option<String>,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub content: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model: String,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.config.nilai_model.clone(),
    })
}

/// `POST /api/chat`: one dispatch call per request.
///
/// When both `accountId` and `privateKey` are supplied, a request-scoped
/// session is constructed for this call only and discarded afterwards.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<Value>)> {
    if request.message.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "message is required",
        ));
    }

    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "Chat request received");

    let scoped = match (&request.account_id, &request.private_key) {
        (Some(account_id), Some(private_key)) => Some(Session::with_credentials(
            &state.config,
            LedgerCredentials {
                account_id: account_id.clone(),
                private_key: private_key.clone(),
            },
        )),
        (Some(_), None) | (None, Some(_)) => {
            return Err(error_response(
                StatusCode::BAD_REQUEST,
                "accountId and privateKey must be supplied together",
            ));
        }
        (None, None) => None,
    };

    let session = scoped.as_ref().unwrap_or(&state.session);

    match session.dispatch(&request.message).await {
        Ok(result) => {
            tracing::info!(%request_id, "Chat request completed");
            Ok(Json(ChatResponse {
                content: result.content,
            }))
        }
        Err(e) => {
            tracing::error!(%request_id, error = %e, "Chat request failed");
            Err(error_response(StatusCode::BAD_GATEWAY, &e.to_string()))
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"error": message})))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_accepts_camel_case_overrides() {
        let body = r#"{"message": "hi", "accountId": "0.0.1", "privateKey": "302e"}"#;
        let request: ChatRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.message, "hi");
        assert_eq!(request.account_id.as_deref(), Some("0.0.1"));
        assert_eq!(request.private_key.as_deref(), Some("302e"));
    }

    #[test]
    fn test_chat_request_overrides_are_optional() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(request.account_id.is_none());
        assert!(request.private_key.is_none());
    }
}
