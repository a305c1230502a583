//! Simulation engine.
//!
//! Derives a result from the submitted plan deterministically: the RNG is
//! seeded from a digest of the plan's content, so resubmitting an unchanged
//! plan reproduces the same numbers and any edit changes them.

use chrono::Utc;
use intent_core::config::SimulationConfig;
use intent_core::types::{ChannelGroup, JourneyPath, SegmentKind};
use intent_core::SimulatorResult;
use intent_wizard::SimulationPlan;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::result::{
    AudienceOutcome, ChannelOutcome, CreativeOutcome, FunnelStage, JourneyOutcome, ResultOverview,
    SimulationResult,
};

/// Baseline performance profile for one channel group: reach, engagement,
/// conversion (all percent) and cost per engagement in dollars.
struct ChannelProfile {
    reach: f64,
    engagement: f64,
    conversion: f64,
    cost: f64,
}

fn channel_profile(group: ChannelGroup) -> ChannelProfile {
    match group {
        ChannelGroup::Email => ChannelProfile {
            reach: 85.0,
            engagement: 25.0,
            conversion: 3.5,
            cost: 0.2,
        },
        ChannelGroup::Influencer => ChannelProfile {
            reach: 65.0,
            engagement: 42.0,
            conversion: 5.8,
            cost: 1.2,
        },
        ChannelGroup::Social => ChannelProfile {
            reach: 75.0,
            engagement: 38.0,
            conversion: 4.2,
            cost: 0.8,
        },
        ChannelGroup::Display => ChannelProfile {
            reach: 90.0,
            engagement: 12.0,
            conversion: 1.2,
            cost: 0.5,
        },
        ChannelGroup::Ctv => ChannelProfile {
            reach: 50.0,
            engagement: 22.0,
            conversion: 2.8,
            cost: 2.5,
        },
        ChannelGroup::Sms => ChannelProfile {
            reach: 60.0,
            engagement: 15.0,
            conversion: 1.5,
            cost: 0.3,
        },
    }
}

/// Funnel stage pass-through rates: impressions -> clicks -> product views
/// -> add to cart -> purchases.
const FUNNEL_STAGES: [(&str, f64); 4] = [
    ("Clicks", 0.25),
    ("Product Views", 0.60),
    ("Add to Cart", 0.33),
    ("Purchases", 0.40),
];

/// Executes submitted plans. Stateless apart from tuning parameters.
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Run the simulation for a submitted plan.
    pub fn run(&self, plan: &SimulationPlan) -> SimulatorResult<SimulationResult> {
        let mut rng = StdRng::seed_from_u64(plan_seed(plan));

        let journeys: Vec<JourneyOutcome> = plan
            .paths
            .iter()
            .map(|path| self.journey_outcome(path, &mut rng))
            .collect();

        let channels = self.channel_outcomes(plan, &mut rng);
        let audiences = self.audience_outcomes(plan, &journeys, &mut rng);
        let creatives = self.creative_outcomes(plan, &mut rng);
        let funnel = self.funnel(plan, &mut rng);
        let overview = self.overview(&journeys, &channels, &creatives);

        let result = SimulationResult {
            id: Uuid::new_v4(),
            name: plan.campaign.name.clone(),
            client: plan.campaign.client.clone(),
            completed_at: Utc::now(),
            overview,
            journeys,
            audiences,
            channels,
            creatives,
            funnel,
        };

        info!(
            name = %result.name,
            best_journey = %result.overview.best_journey,
            lift = result.overview.predicted_lift_pct,
            "simulation completed"
        );
        Ok(result)
    }

    fn journey_outcome(&self, path: &JourneyPath, rng: &mut StdRng) -> JourneyOutcome {
        let groups = path_groups(path);
        let profiles: Vec<ChannelProfile> = groups.iter().map(|g| channel_profile(*g)).collect();
        let n = profiles.len().max(1) as f64;

        let mean_conversion = profiles.iter().map(|p| p.conversion).sum::<f64>() / n;
        let mean_engagement = profiles.iter().map(|p| p.engagement).sum::<f64>() / n;
        let mean_cost = profiles.iter().map(|p| p.cost).sum::<f64>() / n;

        let conversion_rate = round1(self.jitter(rng, mean_conversion));
        // Plan-level engagement runs well below raw channel engagement.
        let engagement = round1(self.jitter(rng, mean_engagement * 0.4));
        // Expensive channel mixes skew toward bigger baskets.
        let aov = round0(self.jitter(rng, 45.0 + mean_cost * 30.0));
        let drop_off_rate = round0((95.0 - engagement * 2.0).clamp(50.0, 95.0));

        JourneyOutcome {
            name: path.name.clone(),
            conversion_rate,
            aov,
            engagement,
            drop_off_rate,
        }
    }

    fn channel_outcomes(&self, plan: &SimulationPlan, rng: &mut StdRng) -> Vec<ChannelOutcome> {
        let mut used: Vec<ChannelGroup> = Vec::new();
        for group in ChannelGroup::ALL {
            if plan.paths.iter().any(|p| path_groups(p).contains(&group)) {
                used.push(group);
            }
        }

        used.into_iter()
            .map(|group| {
                let profile = channel_profile(group);
                ChannelOutcome {
                    channel: group,
                    reach: round0(self.jitter(rng, profile.reach)),
                    engagement: round0(self.jitter(rng, profile.engagement)),
                    conversion: round1(self.jitter(rng, profile.conversion)),
                    cost: round2(self.jitter(rng, profile.cost)),
                }
            })
            .collect()
    }

    fn audience_outcomes(
        &self,
        plan: &SimulationPlan,
        journeys: &[JourneyOutcome],
        rng: &mut StdRng,
    ) -> Vec<AudienceOutcome> {
        let overall_engagement = if journeys.is_empty() {
            8.0
        } else {
            journeys.iter().map(|j| j.engagement).sum::<f64>() / journeys.len() as f64
        };

        plan.segments
            .iter()
            .map(|segment| {
                // A segment inherits the outcome of the journey targeting it,
                // falling back to the overall mean when nothing targets it
                // (sections are independently editable, so that can happen).
                let targeted = plan
                    .paths
                    .iter()
                    .position(|p| segment.name.starts_with(&p.target_audience))
                    .and_then(|i| journeys.get(i));

                let (engagement, conversion) = match targeted {
                    Some(j) => (j.engagement, j.conversion_rate),
                    None => (
                        round1(self.jitter(rng, overall_engagement)),
                        round1(self.jitter(rng, 2.0)),
                    ),
                };

                // Larger and predefined segments carry more modeled history,
                // which shows up as higher lifetime value.
                let size_factor = (segment.size as f64 / 25_000.0).clamp(0.5, 3.0);
                let kind_factor = match segment.kind {
                    SegmentKind::Predefined => 1.2,
                    SegmentKind::Custom => 0.9,
                };
                let ltv = round0(self.jitter(rng, 150.0 * size_factor * kind_factor));

                AudienceOutcome {
                    segment: segment.name.clone(),
                    engagement,
                    conversion,
                    ltv,
                    insights: segment_insights(segment.name.as_str(), engagement),
                }
            })
            .collect()
    }

    fn creative_outcomes(&self, plan: &SimulationPlan, rng: &mut StdRng) -> Vec<CreativeOutcome> {
        plan.variants
            .iter()
            .map(|variant| {
                let approach = variant.approach.to_lowercase();
                let base_ctr = if approach.contains("emotional") || approach.contains("bold") {
                    3.6
                } else if approach.contains("premium") || approach.contains("clean") {
                    2.6
                } else {
                    3.0
                };
                let ctr = round1(self.jitter(rng, base_ctr));
                CreativeOutcome {
                    variant: variant.name.clone(),
                    ctr,
                    conversion: round1(self.jitter(rng, ctr * 1.15)),
                    engagement: round1(self.jitter(rng, ctr * 3.2)),
                }
            })
            .collect()
    }

    fn funnel(&self, plan: &SimulationPlan, rng: &mut StdRng) -> Vec<FunnelStage> {
        // Impression volume scales with the selected audience.
        let audience_factor = (plan.total_audience_size() as f64 / 90_000.0).clamp(0.1, 10.0);
        let mut value = (self.config.base_impressions as f64 * audience_factor) as u64;

        let mut stages = vec![FunnelStage {
            name: "Impressions".to_string(),
            value,
        }];
        for (name, rate) in FUNNEL_STAGES {
            value = (value as f64 * self.jitter(rng, rate)).round() as u64;
            stages.push(FunnelStage {
                name: name.to_string(),
                value,
            });
        }
        stages
    }

    fn overview(
        &self,
        journeys: &[JourneyOutcome],
        channels: &[ChannelOutcome],
        creatives: &[CreativeOutcome],
    ) -> ResultOverview {
        let best_journey = journeys
            .iter()
            .max_by(|a, b| a.conversion_rate.total_cmp(&b.conversion_rate));
        let best_channel = channels
            .iter()
            .max_by(|a, b| a.engagement.total_cmp(&b.engagement));
        let worst_channel = channels
            .iter()
            .min_by(|a, b| a.engagement.total_cmp(&b.engagement));

        let best_journey_name = best_journey
            .map(|j| j.name.clone())
            .unwrap_or_else(|| "n/a".to_string());
        let best_channel_name = best_channel
            .map(|c| c.channel.label().to_string())
            .unwrap_or_else(|| "n/a".to_string());

        let predicted_lift_pct = best_journey
            .map(|j| (j.conversion_rate * 3.1).round().clamp(5.0, 30.0))
            .unwrap_or(0.0);

        let mut key_insights = Vec::new();
        let mut recommendations = Vec::new();

        if let (Some(best), Some(worst)) = (best_channel, worst_channel) {
            key_insights.push(format!(
                "{} drives the strongest engagement ({}%) across the modeled journeys",
                best.channel.label(),
                best.engagement
            ));
            if best.channel != worst.channel {
                key_insights.push(format!(
                    "{} underperforms at {}% engagement for this audience mix",
                    worst.channel.label(),
                    worst.engagement
                ));
                recommendations.push(format!(
                    "Shift budget from {} to {}",
                    worst.channel.label(),
                    best.channel.label()
                ));
            }
            recommendations.push(format!(
                "Increase {} investment for the {}",
                best.channel.label(),
                best_journey_name
            ));
        }

        if creatives.len() >= 2 {
            let mut by_ctr: Vec<&CreativeOutcome> = creatives.iter().collect();
            by_ctr.sort_by(|a, b| b.ctr.total_cmp(&a.ctr));
            let (winner, runner_up) = (by_ctr[0], by_ctr[1]);
            let gap = round1(winner.ctr - runner_up.ctr);
            key_insights.push(format!(
                "Creative variant '{}' outperforms '{}' by {gap}% CTR",
                winner.variant, runner_up.variant
            ));
            recommendations.push(format!(
                "Lead with the '{}' creative across all segments",
                winner.variant
            ));
        }

        ResultOverview {
            best_journey: best_journey_name,
            best_channel: best_channel_name,
            predicted_lift_pct,
            key_insights,
            recommendations,
        }
    }

    /// Apply bounded noise around a baseline.
    fn jitter(&self, rng: &mut StdRng, value: f64) -> f64 {
        let pct = self.config.noise_pct;
        if pct <= 0.0 {
            return value;
        }
        value * (1.0 + rng.gen_range(-pct..=pct))
    }
}

/// Deterministic seed from the plan's identifying content. Generated ids
/// and timestamps are excluded so that an unchanged plan reproduces the
/// same seed across sessions.
fn plan_seed(plan: &SimulationPlan) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(plan.campaign.name.as_bytes());
    hasher.update(plan.campaign.client.as_bytes());
    if let Some(objective) = plan.campaign.objective {
        hasher.update(objective.label().as_bytes());
    }
    for segment in &plan.segments {
        hasher.update(segment.name.as_bytes());
        hasher.update(segment.size.to_le_bytes());
    }
    for variant in &plan.variants {
        hasher.update(variant.name.as_bytes());
        hasher.update(variant.approach.as_bytes());
    }
    for path in &plan.paths {
        hasher.update(path.name.as_bytes());
        hasher.update(path.target_audience.as_bytes());
        for channel in &path.channels {
            hasher.update(channel.label().as_bytes());
        }
    }
    let digest = hasher.finalize();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed)
}

fn path_groups(path: &JourneyPath) -> Vec<ChannelGroup> {
    let mut groups = Vec::new();
    for channel in &path.channels {
        let group = channel.group();
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

fn segment_insights(name: &str, engagement: f64) -> Vec<String> {
    let mut insights = Vec::new();
    let lower = name.to_lowercase();
    if lower.contains("gen z") {
        insights.push("High engagement with influencer content".to_string());
        insights.push("Strong preference for video content".to_string());
    } else if lower.contains("high-value") {
        insights.push("Positive response to social proof".to_string());
        insights.push("Preference for premium messaging".to_string());
    } else if lower.contains("dormant") {
        insights.push("Good email reactivation".to_string());
        insights.push("High spam rate for SMS".to_string());
    }
    if engagement >= 10.0 {
        insights.push("Above-average engagement for this plan".to_string());
    } else {
        insights.push("Engagement below plan average".to_string());
    }
    insights
}

fn round0(v: f64) -> f64 {
    v.round()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_core::types::Objective;
    use intent_wizard::plan::CampaignDetailsPatch;

    fn sample_plan() -> SimulationPlan {
        let mut plan = SimulationPlan::prefilled();
        plan.apply_campaign_patch(CampaignDetailsPatch {
            name: Some("Velari ReNature Launch".to_string()),
            client: Some("Velari Threads".to_string()),
            objective: Some(Objective::IncreaseSales),
            description: None,
        });
        plan
    }

    fn engine() -> SimulationEngine {
        SimulationEngine::new(SimulationConfig::default())
    }

    // 1. Determinism ---------------------------------------------------------

    #[test]
    fn test_same_plan_yields_same_numbers() {
        let plan = sample_plan();
        let a = engine().run(&plan).unwrap();
        let b = engine().run(&plan).unwrap();
        assert_eq!(a.journeys, b.journeys);
        assert_eq!(a.audiences, b.audiences);
        assert_eq!(a.channels, b.channels);
        assert_eq!(a.creatives, b.creatives);
        assert_eq!(a.funnel, b.funnel);
    }

    #[test]
    fn test_submission_content_changes_the_result() {
        let plan = sample_plan();
        let mut edited = plan.clone();
        edited.apply_campaign_patch(CampaignDetailsPatch {
            name: Some("Completely Different Campaign".to_string()),
            ..Default::default()
        });

        let a = engine().run(&plan).unwrap();
        let b = engine().run(&edited).unwrap();
        assert_ne!(a.journeys, b.journeys);
    }

    // 2. Result shape --------------------------------------------------------

    #[test]
    fn test_one_outcome_per_plan_entry() {
        let plan = sample_plan();
        let result = engine().run(&plan).unwrap();
        assert_eq!(result.journeys.len(), plan.paths.len());
        assert_eq!(result.audiences.len(), plan.segments.len());
        assert_eq!(result.creatives.len(), plan.variants.len());
        assert_eq!(result.funnel.len(), 5);
        assert_eq!(result.funnel[0].name, "Impressions");
    }

    #[test]
    fn test_channel_outcomes_cover_only_used_groups() {
        let plan = sample_plan();
        let result = engine().run(&plan).unwrap();
        // Prefilled paths use influencer, social, display, email, CTV — no SMS.
        assert!(result
            .channels
            .iter()
            .all(|c| c.channel != ChannelGroup::Sms));
        assert!(result
            .channels
            .iter()
            .any(|c| c.channel == ChannelGroup::Influencer));
    }

    #[test]
    fn test_funnel_is_monotonically_decreasing() {
        let result = engine().run(&sample_plan()).unwrap();
        for pair in result.funnel.windows(2) {
            assert!(pair[1].value <= pair[0].value);
        }
    }

    // 3. Overview ------------------------------------------------------------

    #[test]
    fn test_best_journey_has_highest_conversion() {
        let result = engine().run(&sample_plan()).unwrap();
        let max = result
            .journeys
            .iter()
            .map(|j| j.conversion_rate)
            .fold(f64::MIN, f64::max);
        let best = result
            .journeys
            .iter()
            .find(|j| j.name == result.overview.best_journey)
            .unwrap();
        assert_eq!(best.conversion_rate, max);
        assert!(result.overview.predicted_lift_pct >= 5.0);
        assert!(!result.overview.key_insights.is_empty());
        assert!(!result.overview.recommendations.is_empty());
    }
}
