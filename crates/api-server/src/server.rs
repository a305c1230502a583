//! API server — HTTP surface plus operational endpoints and metrics.

use crate::router::simulator_router;
use crate::store::SimulatorStore;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use intent_core::AppConfig;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared operational state for health endpoints.
#[derive(Clone)]
struct OpsState {
    node_id: String,
    start_time: Instant,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    node_id: String,
    uptime_secs: u64,
}

async fn health_check(State(state): State<OpsState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

async fn readiness() -> &'static str {
    "ready"
}

async fn liveness() -> &'static str {
    "alive"
}

/// Main API server for the simulator.
pub struct ApiServer {
    config: AppConfig,
    store: Arc<SimulatorStore>,
}

impl ApiServer {
    pub fn new(config: AppConfig, store: Arc<SimulatorStore>) -> Self {
        Self { config, store }
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let ops = OpsState {
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
        };

        let app = Router::new()
            .merge(simulator_router(self.store.clone()))
            // Operational endpoints
            .route("/health", get(health_check).with_state(ops))
            .route("/ready", get(readiness))
            .route("/live", get(liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http());

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics exporter on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
