//! API request/response types and the audit log model.

use chrono::{DateTime, Utc};
use intent_core::types::{AudienceSegment, Channel, Objective, SegmentKind};
use intent_wizard::plan::SimulationPlan;
use intent_wizard::{WizardSession, WizardStep};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Wizard sessions ───────────────────────────────────────────────────────

/// Session as the client sees it, with the boundary capability flags so the
/// next/previous affordances can be disabled at the sequence ends.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub current_step: WizardStep,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub plan: SimulationPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&WizardSession> for SessionView {
    fn from(session: &WizardSession) -> Self {
        Self {
            id: session.id,
            current_step: session.current_step,
            can_advance: session.can_advance(),
            can_retreat: session.can_retreat(),
            plan: session.plan.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GotoRequest {
    /// Kebab-case step identifier, e.g. `campaign-details`.
    pub step: String,
}

#[derive(Debug, Deserialize)]
pub struct AddSegmentRequest {
    pub name: String,
    pub size: u64,
    #[serde(default = "default_segment_kind")]
    pub kind: SegmentKind,
}

fn default_segment_kind() -> SegmentKind {
    SegmentKind::Custom
}

#[derive(Debug, Deserialize)]
pub struct AddVariantRequest {
    pub name: String,
    pub approach: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct AddPathRequest {
    pub name: String,
    pub target_audience: String,
    pub channels: Vec<Channel>,
}

#[derive(Debug, Serialize)]
pub struct AddedResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// Identifier of the computed simulation; the result is retrievable at
    /// `/api/v1/simulations/{id}/result`.
    pub simulation_id: Uuid,
}

// ─── Result report ─────────────────────────────────────────────────────────

/// Derived display values for one simulation result: the funnel breakdown,
/// the recommended channel mix, per-channel ROI, and budget actions.
#[derive(Debug, Clone, Serialize)]
pub struct ResultReport {
    pub simulation_id: Uuid,
    pub funnel: intent_reporting::FunnelBreakdown,
    pub channel_mix: Vec<intent_reporting::ChannelShare>,
    pub roi: Vec<ChannelRoi>,
    pub budget: Vec<intent_reporting::BudgetRecommendation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelRoi {
    pub channel: intent_core::types::ChannelGroup,
    pub roi: f64,
}

// ─── Dashboard ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub total_simulations: u64,
    pub completed_simulations: u64,
    pub avg_predicted_lift_pct: f64,
    pub best_channel: String,
}

// ─── Catalog ───────────────────────────────────────────────────────────────

/// Everything the wizard's pickers offer.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub clients: Vec<String>,
    pub objectives: Vec<ObjectiveEntry>,
    pub predefined_segments: Vec<AudienceSegment>,
    pub channels: Vec<ChannelEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveEntry {
    pub objective: Objective,
    pub label: String,
    pub key_metric: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelEntry {
    pub channel: Channel,
    pub label: String,
    /// Abbreviated form for compact journey-flow rendering.
    pub short_label: String,
}

// ─── Audit log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub user: String,
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Duplicate,
    Submit,
}

// ─── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
