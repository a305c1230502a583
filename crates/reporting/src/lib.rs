//! Derived display values for the results surface: funnel breakdowns,
//! channel mix proportions, and budget recommendations.

pub mod channel_mix;
pub mod funnel;

pub use channel_mix::{BudgetAction, BudgetRecommendation, ChannelShare};
pub use funnel::FunnelBreakdown;
