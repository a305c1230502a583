//! Channel mix proportions, ROI, and budget allocation recommendations.

use intent_core::types::ChannelGroup;
use intent_simulation::result::ChannelOutcome;
use serde::{Deserialize, Serialize};

/// Engagement thresholds for budget actions.
const INCREASE_ENGAGEMENT: f64 = 25.0;
const DECREASE_ENGAGEMENT: f64 = 16.0;
/// Cost per engagement above which a well-performing channel still needs
/// tighter targeting.
const OPTIMIZE_COST: f64 = 2.0;

/// One channel's share of the recommended mix, by engagement weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelShare {
    pub channel: ChannelGroup,
    pub share_pct: f64,
}

/// Engagement-weighted channel mix. Shares are rounded to whole percents
/// and sum to ~100 for a non-empty input.
pub fn channel_mix(channels: &[ChannelOutcome]) -> Vec<ChannelShare> {
    let total: f64 = channels.iter().map(|c| c.engagement).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    channels
        .iter()
        .map(|c| ChannelShare {
            channel: c.channel,
            share_pct: (c.engagement / total * 100.0).round(),
        })
        .collect()
}

/// Return on investment figure as the results table shows it.
pub fn roi(outcome: &ChannelOutcome) -> f64 {
    if outcome.cost <= 0.0 {
        return 0.0;
    }
    ((outcome.conversion / outcome.cost) * 100.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetAction {
    Increase,
    Decrease,
    Optimize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub channel: ChannelGroup,
    pub action: BudgetAction,
    pub reason: String,
}

/// Budget actions per channel: strong engagement grows budget, weak
/// engagement loses it, and expensive strong channels get retargeted.
pub fn budget_recommendations(channels: &[ChannelOutcome]) -> Vec<BudgetRecommendation> {
    channels
        .iter()
        .map(|c| {
            if c.engagement < DECREASE_ENGAGEMENT {
                BudgetRecommendation {
                    channel: c.channel,
                    action: BudgetAction::Decrease,
                    reason: format!(
                        "Low engagement ({}%) and poor ROI ({}x)",
                        c.engagement,
                        roi(c)
                    ),
                }
            } else if c.cost >= OPTIMIZE_COST {
                BudgetRecommendation {
                    channel: c.channel,
                    action: BudgetAction::Optimize,
                    reason: format!(
                        "Good performance but high cost (${} per engagement), target more precisely",
                        c.cost
                    ),
                }
            } else if c.engagement >= INCREASE_ENGAGEMENT {
                BudgetRecommendation {
                    channel: c.channel,
                    action: BudgetAction::Increase,
                    reason: format!(
                        "High engagement ({}%) at ${} per engagement",
                        c.engagement, c.cost
                    ),
                }
            } else {
                BudgetRecommendation {
                    channel: c.channel,
                    action: BudgetAction::Optimize,
                    reason: format!("Middling engagement ({}%), test before scaling", c.engagement),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_channels() -> Vec<ChannelOutcome> {
        vec![
            ChannelOutcome {
                channel: ChannelGroup::Email,
                reach: 85.0,
                engagement: 25.0,
                conversion: 3.5,
                cost: 0.2,
            },
            ChannelOutcome {
                channel: ChannelGroup::Influencer,
                reach: 65.0,
                engagement: 42.0,
                conversion: 5.8,
                cost: 1.2,
            },
            ChannelOutcome {
                channel: ChannelGroup::Sms,
                reach: 60.0,
                engagement: 15.0,
                conversion: 1.5,
                cost: 0.3,
            },
            ChannelOutcome {
                channel: ChannelGroup::Ctv,
                reach: 50.0,
                engagement: 22.0,
                conversion: 2.8,
                cost: 2.5,
            },
        ]
    }

    #[test]
    fn test_mix_shares_sum_to_about_100() {
        let mix = channel_mix(&sample_channels());
        let total: f64 = mix.iter().map(|s| s.share_pct).sum();
        assert!((total - 100.0).abs() <= 3.0, "total was {total}");
    }

    #[test]
    fn test_roi_matches_display_formula() {
        let channels = sample_channels();
        // Email: 3.5 / 0.2 * 10 = 175.0
        assert_eq!(roi(&channels[0]), 175.0);
        // SMS: 1.5 / 0.3 * 10 = 50.0
        assert_eq!(roi(&channels[2]), 50.0);
    }

    #[test]
    fn test_budget_actions() {
        let recs = budget_recommendations(&sample_channels());
        let action_for = |g: ChannelGroup| recs.iter().find(|r| r.channel == g).unwrap().action;

        assert_eq!(action_for(ChannelGroup::Email), BudgetAction::Increase);
        assert_eq!(action_for(ChannelGroup::Influencer), BudgetAction::Increase);
        assert_eq!(action_for(ChannelGroup::Sms), BudgetAction::Decrease);
        assert_eq!(action_for(ChannelGroup::Ctv), BudgetAction::Optimize);
    }

    #[test]
    fn test_empty_input() {
        assert!(channel_mix(&[]).is_empty());
        assert!(budget_recommendations(&[]).is_empty());
    }
}
