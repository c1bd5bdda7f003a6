//! HTTP server for the Prometheus endpoint and the latest result.

use crate::analysis::ResultSummary;
use crate::metrics::MetricsRegistry;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during metrics server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Configuration for the metrics server.
#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
}

impl Default for MetricsServerConfig {
    fn default() -> Self {
        Self::with_port(9464)
    }
}

impl MetricsServerConfig {
    /// Creates a config listening on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }
}

/// State shared between the test loop and the HTTP handlers.
pub struct MetricsState {
    registry: MetricsRegistry,
    latest: Option<ResultSummary>,
}

impl MetricsState {
    /// Records a finished run and keeps it as the latest result.
    pub fn record(&mut self, summary: &ResultSummary) {
        self.registry.record(summary);
        self.latest = Some(summary.clone());
    }

    /// The most recently recorded run, if any.
    pub fn latest(&self) -> Option<&ResultSummary> {
        self.latest.as_ref()
    }

    /// Encodes the registry in Prometheus text format.
    pub fn encode(&self) -> Result<String, super::MetricsError> {
        self.registry.encode()
    }
}

type SharedState = Arc<RwLock<MetricsState>>;

/// HTTP server exposing `/metrics`, `/latest` and `/health`.
pub struct MetricsServer {
    config: MetricsServerConfig,
    state: SharedState,
}

impl MetricsServer {
    /// Creates a new metrics server.
    pub fn new(config: MetricsServerConfig, registry: MetricsRegistry) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(MetricsState {
                registry,
                latest: None,
            })),
        }
    }

    /// Returns a handle for recording runs.
    pub fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    fn router(state: SharedState) -> Router {
        Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/latest", get(latest_handler))
            .route("/health", get(health_handler))
            .with_state(state)
    }

    /// Serves until the process exits.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!(addr = %self.config.bind_addr, "Metrics server listening");

        axum::serve(listener, Self::router(self.state))
            .await
            .map_err(|e| ServerError::Server(e.to_string()))
    }
}

async fn metrics_handler(State(state): State<SharedState>) -> Response {
    match state.read().await.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {}", e),
        )
            .into_response(),
    }
}

async fn latest_handler(State(state): State<SharedState>) -> Response {
    match state.read().await.latest() {
        Some(summary) => Json(summary.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "no run recorded yet").into_response(),
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_test;
    use crate::source::CLASS_SAMPLE;

    #[test]
    fn test_config_default() {
        let config = MetricsServerConfig::default();
        assert_eq!(config.bind_addr.port(), 9464);
    }

    #[test]
    fn test_config_with_port() {
        let config = MetricsServerConfig::with_port(8080);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[tokio::test]
    async fn test_state_keeps_latest_run() {
        let server = MetricsServer::new(
            MetricsServerConfig::with_port(0),
            MetricsRegistry::new().unwrap(),
        );
        let state = server.state();
        assert!(state.read().await.latest().is_none());

        let summary = run_test(&CLASS_SAMPLE, 3).unwrap();
        state.write().await.record(&summary);

        let guard = state.read().await;
        assert_eq!(guard.latest(), Some(&summary));
        assert!(guard.encode().unwrap().contains("poker_test_passed 1"));
    }
}
