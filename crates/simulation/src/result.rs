//! Simulation result model — everything the results surface displays.

use chrono::{DateTime, Utc};
use intent_core::types::ChannelGroup;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Headline findings of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultOverview {
    pub best_journey: String,
    pub best_channel: String,
    pub predicted_lift_pct: f64,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Predicted performance of one journey path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyOutcome {
    pub name: String,
    /// Percent.
    pub conversion_rate: f64,
    /// Average order value, dollars.
    pub aov: f64,
    /// Percent.
    pub engagement: f64,
    /// Percent of entrants lost before conversion.
    pub drop_off_rate: f64,
}

/// Predicted response of one audience segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceOutcome {
    pub segment: String,
    pub engagement: f64,
    pub conversion: f64,
    /// Lifetime value, dollars.
    pub ltv: f64,
    pub insights: Vec<String>,
}

/// Predicted performance of one channel group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    pub channel: ChannelGroup,
    /// Percent of the audience reachable.
    pub reach: f64,
    pub engagement: f64,
    pub conversion: f64,
    /// Cost per engagement, dollars.
    pub cost: f64,
}

/// A/B comparison entry for one creative variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeOutcome {
    pub variant: String,
    pub ctr: f64,
    pub conversion: f64,
    pub engagement: f64,
}

/// One stage of the customer funnel, top stage first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub value: u64,
}

/// The complete computed result for one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub id: Uuid,
    pub name: String,
    pub client: String,
    pub completed_at: DateTime<Utc>,
    pub overview: ResultOverview,
    pub journeys: Vec<JourneyOutcome>,
    pub audiences: Vec<AudienceOutcome>,
    pub channels: Vec<ChannelOutcome>,
    pub creatives: Vec<CreativeOutcome>,
    pub funnel: Vec<FunnelStage>,
}
