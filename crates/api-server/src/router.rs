//! Simulator API router — mounts all endpoints under /api/v1.

use crate::handlers::{self, SimulatorState};
use crate::store::SimulatorStore;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;

/// Build the simulator router with all endpoints.
/// Returns a Router that should be merged into the main app.
pub fn simulator_router(store: Arc<SimulatorStore>) -> Router {
    let state = SimulatorState { store };

    Router::new()
        // Dashboard
        .route("/api/v1/simulations", get(handlers::list_simulations))
        .route("/api/v1/simulations/:id", get(handlers::get_simulation).delete(handlers::delete_simulation))
        .route("/api/v1/simulations/:id/result", get(handlers::get_result))
        .route("/api/v1/simulations/:id/report", get(handlers::get_report))
        .route("/api/v1/simulations/:id/duplicate", post(handlers::duplicate_simulation))
        .route("/api/v1/dashboard/overview", get(handlers::dashboard_overview))
        // Catalog
        .route("/api/v1/catalog", get(handlers::get_catalog))
        // Wizard sessions
        .route("/api/v1/wizard/sessions", post(handlers::create_session))
        .route("/api/v1/wizard/sessions/:id", get(handlers::get_session).delete(handlers::delete_session))
        .route("/api/v1/wizard/sessions/:id/advance", post(handlers::advance_session))
        .route("/api/v1/wizard/sessions/:id/retreat", post(handlers::retreat_session))
        .route("/api/v1/wizard/sessions/:id/goto", post(handlers::goto_step))
        .route("/api/v1/wizard/sessions/:id/campaign-details", patch(handlers::update_campaign_details))
        .route("/api/v1/wizard/sessions/:id/segments", post(handlers::add_segment))
        .route("/api/v1/wizard/sessions/:id/segments/:segment_id", delete(handlers::remove_segment))
        .route("/api/v1/wizard/sessions/:id/variants", post(handlers::add_variant))
        .route("/api/v1/wizard/sessions/:id/variants/:variant_id", delete(handlers::remove_variant))
        .route("/api/v1/wizard/sessions/:id/paths", post(handlers::add_path))
        .route("/api/v1/wizard/sessions/:id/paths/:path_id", delete(handlers::remove_path))
        .route("/api/v1/wizard/sessions/:id/submit", post(handlers::submit_session))
        // Audit log
        .route("/api/v1/audit-log", get(handlers::audit_log))
        .with_state(state)
}
