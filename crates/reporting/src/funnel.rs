//! Funnel breakdown — per-stage shares and step conversion rates.

use intent_simulation::result::FunnelStage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelStageBreakdown {
    pub name: String,
    pub value: u64,
    /// Share of the top stage, percent.
    pub share_of_top_pct: f64,
    /// Conversion from the previous stage, percent. 100 for the top stage.
    pub step_conversion_pct: f64,
}

/// Display-ready funnel derived from raw stage counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelBreakdown {
    pub stages: Vec<FunnelStageBreakdown>,
    /// Top stage to bottom stage, percent.
    pub overall_conversion_pct: f64,
}

impl FunnelBreakdown {
    pub fn from_stages(stages: &[FunnelStage]) -> Self {
        let top = stages.first().map(|s| s.value).unwrap_or(0);
        let mut prev = top;
        let breakdown: Vec<FunnelStageBreakdown> = stages
            .iter()
            .map(|stage| {
                let share = percent(stage.value, top);
                let step = percent(stage.value, prev);
                prev = stage.value;
                FunnelStageBreakdown {
                    name: stage.name.clone(),
                    value: stage.value,
                    share_of_top_pct: share,
                    step_conversion_pct: step,
                }
            })
            .collect();

        let overall = stages
            .last()
            .map(|bottom| percent(bottom.value, top))
            .unwrap_or(0.0);

        Self {
            stages: breakdown,
            overall_conversion_pct: overall,
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stages() -> Vec<FunnelStage> {
        [
            ("Impressions", 100_000),
            ("Clicks", 25_000),
            ("Product Views", 15_000),
            ("Add to Cart", 5_000),
            ("Purchases", 2_000),
        ]
        .into_iter()
        .map(|(name, value)| FunnelStage {
            name: name.to_string(),
            value,
        })
        .collect()
    }

    #[test]
    fn test_share_of_top() {
        let breakdown = FunnelBreakdown::from_stages(&sample_stages());
        let shares: Vec<f64> = breakdown
            .stages
            .iter()
            .map(|s| s.share_of_top_pct)
            .collect();
        assert_eq!(shares, vec![100.0, 25.0, 15.0, 5.0, 2.0]);
        assert_eq!(breakdown.overall_conversion_pct, 2.0);
    }

    #[test]
    fn test_step_conversion() {
        let breakdown = FunnelBreakdown::from_stages(&sample_stages());
        assert_eq!(breakdown.stages[0].step_conversion_pct, 100.0);
        assert_eq!(breakdown.stages[1].step_conversion_pct, 25.0);
        assert_eq!(breakdown.stages[2].step_conversion_pct, 60.0);
        assert_eq!(breakdown.stages[4].step_conversion_pct, 40.0);
    }

    #[test]
    fn test_empty_funnel() {
        let breakdown = FunnelBreakdown::from_stages(&[]);
        assert!(breakdown.stages.is_empty());
        assert_eq!(breakdown.overall_conversion_pct, 0.0);
    }
}
