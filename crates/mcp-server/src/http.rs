//! Streamable HTTP transport.
//!
//! One JSON-RPC message per `POST /mcp`. Requests are answered with a JSON
//! body; notifications with `202 Accepted` and no body.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{ApiError, Result};

/// Header carrying the session id assigned at `initialize`.
pub const SESSION_HEADER: &str = "mcp-session-id";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    /// Expected bearer token. `None` accepts every request.
    pub auth_token: Option<String>,
}

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>, auth_token: Option<String>) -> Self {
        Self {
            dispatcher,
            auth_token,
        }
    }

    /// State guarded by the configured `AUTH_TOKEN`, if any.
    pub fn from_config(dispatcher: Arc<Dispatcher>, config: &Config) -> Self {
        Self::new(dispatcher, config.auth_token.clone())
    }

    /// Whether a request with these headers may reach the dispatcher.
    fn admits(&self, headers: &HeaderMap) -> bool {
        match self.auth_token.as_deref() {
            None => true,
            Some(expected) => bearer_token(headers) == Some(expected),
        }
    }
}

/// Token from `Authorization: Bearer <token>`. A bare token is accepted too.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    Some(value.strip_prefix("Bearer ").unwrap_or(value))
}

#[derive(Debug, Serialize)]
struct Health {
    status: String,
    tools: usize,
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp))
        .route("/mcp/", post(mcp))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = router(state);

    info!(%addr, "Travel MCP server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        tools: state.dispatcher.adapter().registry().len(),
    })
}

async fn mcp(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> std::result::Result<Response, ApiError> {
    if !state.admits(&headers) {
        return Err(ApiError::Unauthorized);
    }

    let request = match Dispatcher::parse(&body) {
        Ok(request) => request,
        Err(response) => return Ok(Json(response).into_response()),
    };

    let is_initialize = request.method == "initialize";
    let Some(response) = state.dispatcher.handle(request).await else {
        debug!("Accepted notification");
        return Ok(StatusCode::ACCEPTED.into_response());
    };

    let mut response = Json(response).into_response();
    let session = if is_initialize {
        HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()
    } else {
        headers.get(SESSION_HEADER).cloned()
    };
    if let Some(session) = session {
        response.headers_mut().insert(SESSION_HEADER, session);
    }

    Ok(response)
}
