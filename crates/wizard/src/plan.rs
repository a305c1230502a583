//! The accumulating simulation plan and its section-level edit operations.
//!
//! The plan has four independent sections. Each section is mutated on its
//! own; no cross-section consistency is enforced (a journey path may keep
//! referencing an audience segment that was removed).

use intent_core::catalog;
use intent_core::types::{
    AudienceSegment, Channel, CreativeVariant, JourneyPath, Objective, SegmentKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Campaign metadata section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignDetails {
    pub name: String,
    pub client: String,
    pub objective: Option<Objective>,
    pub description: String,
}

/// Shallow-merge patch for the campaign-details section: only fields that
/// are present change, siblings keep their prior values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignDetailsPatch {
    pub name: Option<String>,
    pub client: Option<String>,
    pub objective: Option<Objective>,
    pub description: Option<String>,
}

/// The full accumulated form record for one wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationPlan {
    pub campaign: CampaignDetails,
    pub segments: Vec<AudienceSegment>,
    pub variants: Vec<CreativeVariant>,
    pub paths: Vec<JourneyPath>,
}

impl SimulationPlan {
    /// An empty plan with no pre-selected content.
    pub fn empty() -> Self {
        Self {
            campaign: CampaignDetails::default(),
            segments: Vec::new(),
            variants: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// The illustrative pre-populated plan a fresh session starts from.
    pub fn prefilled() -> Self {
        Self {
            campaign: CampaignDetails::default(),
            segments: catalog::default_segments(),
            variants: catalog::default_variants(),
            paths: catalog::default_paths(),
        }
    }

    // ─── Campaign details ──────────────────────────────────────────────────

    pub fn apply_campaign_patch(&mut self, patch: CampaignDetailsPatch) {
        if let Some(name) = patch.name {
            self.campaign.name = name;
        }
        if let Some(client) = patch.client {
            self.campaign.client = client;
        }
        if let Some(objective) = patch.objective {
            self.campaign.objective = Some(objective);
        }
        if let Some(description) = patch.description {
            self.campaign.description = description;
        }
    }

    // ─── Audience ──────────────────────────────────────────────────────────

    pub fn add_segment(&mut self, name: String, size: u64, kind: SegmentKind) -> Uuid {
        let id = Uuid::new_v4();
        self.segments.push(AudienceSegment {
            id,
            name,
            size,
            kind,
        });
        id
    }

    pub fn remove_segment(&mut self, id: Uuid) -> bool {
        let before = self.segments.len();
        self.segments.retain(|s| s.id != id);
        self.segments.len() != before
    }

    pub fn total_audience_size(&self) -> u64 {
        self.segments.iter().map(|s| s.size).sum()
    }

    // ─── Creative ──────────────────────────────────────────────────────────

    pub fn add_variant(&mut self, name: String, approach: String, description: String) -> Uuid {
        let id = Uuid::new_v4();
        self.variants.push(CreativeVariant {
            id,
            name,
            approach,
            description,
        });
        id
    }

    pub fn remove_variant(&mut self, id: Uuid) -> bool {
        let before = self.variants.len();
        self.variants.retain(|v| v.id != id);
        self.variants.len() != before
    }

    // ─── Journey ───────────────────────────────────────────────────────────

    pub fn add_path(
        &mut self,
        name: String,
        target_audience: String,
        channels: Vec<Channel>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.paths.push(JourneyPath {
            id,
            name,
            target_audience,
            channels,
        });
        id
    }

    pub fn remove_path(&mut self, id: Uuid) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p.id != id);
        self.paths.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1. Shallow merge -------------------------------------------------------

    #[test]
    fn test_campaign_patch_only_touches_present_fields() {
        let mut plan = SimulationPlan::empty();
        plan.apply_campaign_patch(CampaignDetailsPatch {
            name: Some("Velari ReNature Launch".to_string()),
            client: Some("Velari Threads".to_string()),
            objective: Some(Objective::IncreaseSales),
            description: Some("Sustainable apparel launch".to_string()),
        });

        plan.apply_campaign_patch(CampaignDetailsPatch {
            name: Some("Velari ReNature Relaunch".to_string()),
            ..Default::default()
        });

        assert_eq!(plan.campaign.name, "Velari ReNature Relaunch");
        assert_eq!(plan.campaign.client, "Velari Threads");
        assert_eq!(plan.campaign.objective, Some(Objective::IncreaseSales));
        assert_eq!(plan.campaign.description, "Sustainable apparel launch");
    }

    #[test]
    fn test_campaign_patch_leaves_other_sections_untouched() {
        let mut plan = SimulationPlan::prefilled();
        let segments_before = plan.segments.len();
        let variants_before = plan.variants.len();
        let paths_before = plan.paths.len();

        plan.apply_campaign_patch(CampaignDetailsPatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        });

        assert_eq!(plan.segments.len(), segments_before);
        assert_eq!(plan.variants.len(), variants_before);
        assert_eq!(plan.paths.len(), paths_before);
    }

    // 2. Section independence ------------------------------------------------

    #[test]
    fn test_removing_segment_does_not_cascade_to_journeys() {
        let mut plan = SimulationPlan::prefilled();
        let genz = plan
            .segments
            .iter()
            .find(|s| s.name == "Gen Z Sustainability Seekers")
            .map(|s| s.id)
            .unwrap();

        assert!(plan.remove_segment(genz));

        // The journey that targeted the removed segment is left as-is.
        assert!(plan
            .paths
            .iter()
            .any(|p| p.target_audience == "Gen Z Sustainability Seekers"));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut plan = SimulationPlan::prefilled();
        assert!(!plan.remove_segment(Uuid::new_v4()));
        assert!(!plan.remove_variant(Uuid::new_v4()));
        assert!(!plan.remove_path(Uuid::new_v4()));
    }

    // 3. Derived values ------------------------------------------------------

    #[test]
    fn test_total_audience_size() {
        let plan = SimulationPlan::prefilled();
        assert_eq!(plan.total_audience_size(), 90_000);
    }
}
