//! HTTP relay that forwards contact submissions to the downstream webhook.

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    contact::config::RelayConfig,
    foundation::error::{FolioError, FolioResult},
};

pub const SEND_FAILED: &str = "Failed to send message to external webhook";
pub const INTERNAL_ERROR: &str = "Internal server error processing contact form";

/// Shared by every request: one pooled client and the downstream URL.
#[derive(Clone, Debug)]
pub struct RelayState {
    client: reqwest::Client,
    webhook_url: Arc<str>,
}

impl RelayState {
    pub fn new(config: &RelayConfig) -> FolioResult<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FolioError::transport(format!("http client init failed: {e}")))?;
        Ok(Self::with_client(client, &config.webhook_url))
    }

    pub fn with_client(client: reqwest::Client, webhook_url: &str) -> Self {
        Self {
            client,
            webhook_url: Arc::from(webhook_url),
        }
    }
}

/// Build the relay application: the contact route plus `GET /healthz`.
pub fn router(state: RelayState, route: &str) -> Router {
    Router::new()
        .route(route, post(relay_contact))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[tracing::instrument(skip_all, fields(bytes = body.len()))]
async fn relay_contact(State(state): State<RelayState>, body: Bytes) -> Response {
    match forward(&state, body).await {
        Ok(status) if status.is_success() => {
            tracing::info!("contact submission relayed");
            (StatusCode::OK, Json(json!({ "success": true }))).into_response()
        }
        Ok(status) => {
            tracing::warn!(%status, "webhook rejected submission");
            (status, Json(json!({ "error": SEND_FAILED }))).into_response()
        }
        Err(err) => {
            tracing::error!(%err, "contact relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_ERROR })),
            )
                .into_response()
        }
    }
}

/// Check the body is JSON, then pass it on untouched. Returns the downstream status.
async fn forward(state: &RelayState, body: Bytes) -> FolioResult<StatusCode> {
    serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|e| FolioError::serde(format!("request body: {e}")))?;
    let resp = state
        .client
        .post(&*state.webhook_url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| FolioError::transport(e.to_string()))?;
    StatusCode::from_u16(resp.status().as_u16())
        .map_err(|e| FolioError::transport(format!("downstream status: {e}")))
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: RelayConfig) -> FolioResult<()> {
    let state = RelayState::new(&config)?;
    let app = router(state, &config.route);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    let addr = listener.local_addr().context("read bound address")?;
    tracing::info!(%addr, route = %config.route, "contact relay listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("relay server")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down contact relay");
}
