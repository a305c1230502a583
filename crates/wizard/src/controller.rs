//! Wizard session controller.
//!
//! Owns one plan record and a current-step indicator. Lives only in memory;
//! discarding the session discards all progress.

use chrono::{DateTime, Utc};
use intent_core::types::{Channel, SegmentKind};
use intent_core::{catalog, SimulatorError, SimulatorResult};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::plan::{CampaignDetailsPatch, SimulationPlan};
use crate::step::WizardStep;

/// One in-flight wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSession {
    pub id: Uuid,
    pub current_step: WizardStep,
    pub plan: SimulationPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WizardSession {
    /// Start a fresh session on the first step with the prefilled plan.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            current_step: WizardStep::CampaignDetails,
            plan: SimulationPlan::prefilled(),
            created_at: now,
            updated_at: now,
        }
    }

    // ─── Navigation ────────────────────────────────────────────────────────

    /// Whether an `advance` call would move to another step.
    pub fn can_advance(&self) -> bool {
        self.current_step.next().is_some()
    }

    /// Whether a `retreat` call would move to another step.
    pub fn can_retreat(&self) -> bool {
        self.current_step.prev().is_some()
    }

    /// Move to the next step. The current step's section must validate
    /// before advancement is allowed. At the last step this is an idempotent
    /// no-op returning the unchanged step.
    pub fn advance(&mut self) -> SimulatorResult<WizardStep> {
        // Boundary no-op first: at the last step nothing moves, so nothing
        // needs to validate either.
        let Some(next) = self.current_step.next() else {
            return Ok(self.current_step);
        };
        self.validate_step(self.current_step)?;
        debug!(session = %self.id, from = %self.current_step, to = %next, "advance");
        self.current_step = next;
        self.updated_at = Utc::now();
        Ok(self.current_step)
    }

    /// Move to the previous step. No validation gate; at the first step this
    /// is an idempotent no-op.
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(prev) = self.current_step.prev() {
            debug!(session = %self.id, from = %self.current_step, to = %prev, "retreat");
            self.current_step = prev;
            self.updated_at = Utc::now();
        }
        self.current_step
    }

    /// Jump directly to a step, as the tab strip allows.
    pub fn goto(&mut self, step: WizardStep) {
        if step != self.current_step {
            self.current_step = step;
            self.updated_at = Utc::now();
        }
    }

    // ─── Section edits ─────────────────────────────────────────────────────

    pub fn update_campaign(&mut self, patch: CampaignDetailsPatch) {
        self.plan.apply_campaign_patch(patch);
        self.updated_at = Utc::now();
    }

    pub fn add_segment(&mut self, name: String, size: u64, kind: SegmentKind) -> Uuid {
        self.updated_at = Utc::now();
        self.plan.add_segment(name, size, kind)
    }

    pub fn remove_segment(&mut self, id: Uuid) -> bool {
        self.updated_at = Utc::now();
        self.plan.remove_segment(id)
    }

    pub fn add_variant(&mut self, name: String, approach: String, description: String) -> Uuid {
        self.updated_at = Utc::now();
        self.plan.add_variant(name, approach, description)
    }

    pub fn remove_variant(&mut self, id: Uuid) -> bool {
        self.updated_at = Utc::now();
        self.plan.remove_variant(id)
    }

    pub fn add_path(
        &mut self,
        name: String,
        target_audience: String,
        channels: Vec<Channel>,
    ) -> Uuid {
        self.updated_at = Utc::now();
        self.plan.add_path(name, target_audience, channels)
    }

    pub fn remove_path(&mut self, id: Uuid) -> bool {
        self.updated_at = Utc::now();
        self.plan.remove_path(id)
    }

    // ─── Validation ────────────────────────────────────────────────────────

    /// Validate the section a step edits. The review step aggregates all
    /// sections, so validating it validates everything.
    pub fn validate_step(&self, step: WizardStep) -> SimulatorResult<()> {
        match step {
            WizardStep::CampaignDetails => self.validate_campaign(),
            WizardStep::Audience => self.validate_audience(),
            WizardStep::Creative => self.validate_creative(),
            WizardStep::Journey => self.validate_journey(),
            WizardStep::Review => self.validate_all(),
        }
    }

    pub fn validate_all(&self) -> SimulatorResult<()> {
        self.validate_campaign()?;
        self.validate_audience()?;
        self.validate_creative()?;
        self.validate_journey()
    }

    fn validate_campaign(&self) -> SimulatorResult<()> {
        let campaign = &self.plan.campaign;
        if campaign.name.trim().is_empty() {
            return Err(SimulatorError::Validation(
                "campaign name must not be empty".to_string(),
            ));
        }
        if campaign.client.trim().is_empty() {
            return Err(SimulatorError::Validation(
                "client must be selected".to_string(),
            ));
        }
        if !catalog::is_known_client(&campaign.client) {
            return Err(SimulatorError::Validation(format!(
                "unknown client '{}'",
                campaign.client
            )));
        }
        if campaign.objective.is_none() {
            return Err(SimulatorError::Validation(
                "objective must be selected".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_audience(&self) -> SimulatorResult<()> {
        if self.plan.segments.is_empty() {
            return Err(SimulatorError::Validation(
                "at least one audience segment is required".to_string(),
            ));
        }
        if let Some(empty) = self.plan.segments.iter().find(|s| s.size == 0) {
            return Err(SimulatorError::Validation(format!(
                "segment '{}' has no profiles",
                empty.name
            )));
        }
        Ok(())
    }

    fn validate_creative(&self) -> SimulatorResult<()> {
        if self.plan.variants.is_empty() {
            return Err(SimulatorError::Validation(
                "at least one creative variant is required".to_string(),
            ));
        }
        if let Some(unnamed) = self.plan.variants.iter().find(|v| v.name.trim().is_empty()) {
            return Err(SimulatorError::Validation(format!(
                "creative variant {} has no name",
                unnamed.id
            )));
        }
        Ok(())
    }

    fn validate_journey(&self) -> SimulatorResult<()> {
        if self.plan.paths.is_empty() {
            return Err(SimulatorError::Validation(
                "at least one customer journey is required".to_string(),
            ));
        }
        if let Some(empty) = self.plan.paths.iter().find(|p| p.channels.is_empty()) {
            return Err(SimulatorError::Validation(format!(
                "journey '{}' has no channels",
                empty.name
            )));
        }
        Ok(())
    }

    // ─── Submission ────────────────────────────────────────────────────────

    /// Terminal action: validate every section and hand off the accumulated
    /// plan. Callable from any step; the UI only offers it on review.
    pub fn submit(&self) -> SimulatorResult<SimulationPlan> {
        self.validate_all()?;
        debug!(session = %self.id, name = %self.plan.campaign.name, "plan submitted");
        Ok(self.plan.clone())
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}
