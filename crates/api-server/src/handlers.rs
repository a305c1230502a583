//! Axum REST handlers for the simulator API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use intent_core::types::{Objective, SimulationSummary};
use intent_core::{catalog, SimulatorError};
use intent_simulation::SimulationResult;
use intent_wizard::plan::CampaignDetailsPatch;
use intent_wizard::WizardStep;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::models::*;
use crate::store::SimulatorStore;

/// Shared simulator state.
#[derive(Clone)]
pub struct SimulatorState {
    pub store: Arc<SimulatorStore>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map domain errors to HTTP at the API boundary.
fn to_api_error(err: SimulatorError) -> ApiError {
    let (status, kind) = match &err {
        SimulatorError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_failed"),
        SimulatorError::Navigation(_) => (StatusCode::BAD_REQUEST, "invalid_step"),
        SimulatorError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        warn!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: kind.to_string(),
            message: err.to_string(),
        }),
    )
}

// ─── Dashboard / simulations ───────────────────────────────────────────────

pub async fn list_simulations(State(state): State<SimulatorState>) -> Json<Vec<SimulationSummary>> {
    Json(state.store.list_simulations())
}

pub async fn get_simulation(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SimulationSummary>, StatusCode> {
    state
        .store
        .get_simulation(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn get_result(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SimulationResult>, ApiError> {
    state.store.get_result(id).map(Json).map_err(to_api_error)
}

pub async fn get_report(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultReport>, ApiError> {
    let result = state.store.get_result(id).map_err(to_api_error)?;
    Ok(Json(ResultReport {
        simulation_id: id,
        funnel: intent_reporting::FunnelBreakdown::from_stages(&result.funnel),
        channel_mix: intent_reporting::channel_mix::channel_mix(&result.channels),
        roi: result
            .channels
            .iter()
            .map(|c| ChannelRoi {
                channel: c.channel,
                roi: intent_reporting::channel_mix::roi(c),
            })
            .collect(),
        budget: intent_reporting::channel_mix::budget_recommendations(&result.channels),
    }))
}

pub async fn duplicate_simulation(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SimulationSummary>), StatusCode> {
    match state.store.duplicate_simulation(id, "admin") {
        Some(copy) => {
            metrics::counter!("simulator.simulations.duplicated").increment(1);
            Ok((StatusCode::CREATED, Json(copy)))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn delete_simulation(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.store.delete_simulation(id, "admin") {
        metrics::counter!("simulator.simulations.deleted").increment(1);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn dashboard_overview(State(state): State<SimulatorState>) -> Json<DashboardOverview> {
    let (total, completed, avg_lift, best_channel) = state.store.overview();
    Json(DashboardOverview {
        total_simulations: total,
        completed_simulations: completed,
        avg_predicted_lift_pct: avg_lift,
        best_channel,
    })
}

// ─── Catalog ───────────────────────────────────────────────────────────────

pub async fn get_catalog() -> Json<CatalogView> {
    Json(CatalogView {
        clients: catalog::CLIENTS.iter().map(|c| c.to_string()).collect(),
        objectives: Objective::ALL
            .iter()
            .map(|o| ObjectiveEntry {
                objective: *o,
                label: o.label().to_string(),
                key_metric: o.key_metric().to_string(),
            })
            .collect(),
        predefined_segments: catalog::predefined_segments(),
        channels: intent_core::types::Channel::ALL
            .iter()
            .map(|c| ChannelEntry {
                channel: *c,
                label: c.label().to_string(),
                short_label: c.short_label().to_string(),
            })
            .collect(),
    })
}

// ─── Wizard sessions ───────────────────────────────────────────────────────

pub async fn create_session(
    State(state): State<SimulatorState>,
) -> (StatusCode, Json<SessionView>) {
    let session = state.store.create_session("admin");
    metrics::counter!("simulator.sessions.created").increment(1);
    (StatusCode::CREATED, Json(SessionView::from(&session)))
}

pub async fn get_session(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, StatusCode> {
    state
        .store
        .get_session(id)
        .map(|s| Json(SessionView::from(&s)))
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_session(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.store.delete_session(id, "admin") {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn advance_session(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    state
        .store
        .advance_session(id)
        .map(|s| Json(SessionView::from(&s)))
        .map_err(to_api_error)
}

pub async fn retreat_session(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    state
        .store
        .retreat_session(id)
        .map(|s| Json(SessionView::from(&s)))
        .map_err(to_api_error)
}

pub async fn goto_step(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
    Json(req): Json<GotoRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let step: WizardStep = req.step.parse().map_err(to_api_error)?;
    state
        .store
        .goto_session(id, step)
        .map(|s| Json(SessionView::from(&s)))
        .map_err(to_api_error)
}

pub async fn update_campaign_details(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CampaignDetailsPatch>,
) -> Result<Json<SessionView>, ApiError> {
    state
        .store
        .edit_session(id, "admin", "campaign_details", |s| {
            s.update_campaign(patch);
            Ok(())
        })
        .map(|(_, s)| {
            metrics::counter!("simulator.sessions.edited").increment(1);
            Json(SessionView::from(&s))
        })
        .map_err(to_api_error)
}

pub async fn add_segment(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddSegmentRequest>,
) -> Result<Json<AddedResponse>, ApiError> {
    state
        .store
        .edit_session(id, "admin", "audience", |s| {
            Ok(s.add_segment(req.name, req.size, req.kind))
        })
        .map(|(segment_id, _)| {
            metrics::counter!("simulator.sessions.edited").increment(1);
            Json(AddedResponse { id: segment_id })
        })
        .map_err(to_api_error)
}

pub async fn remove_segment(
    State(state): State<SimulatorState>,
    Path((id, segment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (removed, _) = state
        .store
        .edit_session(id, "admin", "audience", |s| Ok(s.remove_segment(segment_id)))
        .map_err(to_api_error)?;
    if removed {
        metrics::counter!("simulator.sessions.edited").increment(1);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub async fn add_variant(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddVariantRequest>,
) -> Result<Json<AddedResponse>, ApiError> {
    state
        .store
        .edit_session(id, "admin", "creative", |s| {
            Ok(s.add_variant(req.name, req.approach, req.description))
        })
        .map(|(variant_id, _)| {
            metrics::counter!("simulator.sessions.edited").increment(1);
            Json(AddedResponse { id: variant_id })
        })
        .map_err(to_api_error)
}

pub async fn remove_variant(
    State(state): State<SimulatorState>,
    Path((id, variant_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (removed, _) = state
        .store
        .edit_session(id, "admin", "creative", |s| Ok(s.remove_variant(variant_id)))
        .map_err(to_api_error)?;
    if removed {
        metrics::counter!("simulator.sessions.edited").increment(1);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub async fn add_path(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddPathRequest>,
) -> Result<Json<AddedResponse>, ApiError> {
    state
        .store
        .edit_session(id, "admin", "journey", |s| {
            Ok(s.add_path(req.name, req.target_audience, req.channels))
        })
        .map(|(path_id, _)| {
            metrics::counter!("simulator.sessions.edited").increment(1);
            Json(AddedResponse { id: path_id })
        })
        .map_err(to_api_error)
}

pub async fn remove_path(
    State(state): State<SimulatorState>,
    Path((id, path_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let (removed, _) = state
        .store
        .edit_session(id, "admin", "journey", |s| Ok(s.remove_path(path_id)))
        .map_err(to_api_error)?;
    if removed {
        metrics::counter!("simulator.sessions.edited").increment(1);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

pub async fn submit_session(
    State(state): State<SimulatorState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    match state.store.submit_session(id, "admin") {
        Ok(simulation_id) => {
            metrics::counter!("simulator.simulations.submitted").increment(1);
            Ok((StatusCode::CREATED, Json(SubmitResponse { simulation_id })))
        }
        Err(e) => {
            metrics::counter!("simulator.submit_errors").increment(1);
            Err(to_api_error(e))
        }
    }
}

// ─── Audit log ─────────────────────────────────────────────────────────────

pub async fn audit_log(State(state): State<SimulatorState>) -> Json<Vec<AuditLogEntry>> {
    Json(state.store.get_audit_log())
}
