//! Shared domain types — channels, objectives, segments, creatives, journeys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Channels ──────────────────────────────────────────────────────────────

/// A marketing touchpoint a journey path can route through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Email,
    SocialFacebook,
    SocialInstagram,
    SocialTiktok,
    Display,
    Ctv,
    Sms,
    InfluencerInstagram,
    InfluencerTiktok,
    SocialProof,
}

impl Channel {
    pub const ALL: [Channel; 10] = [
        Channel::Email,
        Channel::SocialFacebook,
        Channel::SocialInstagram,
        Channel::SocialTiktok,
        Channel::Display,
        Channel::Ctv,
        Channel::Sms,
        Channel::InfluencerInstagram,
        Channel::InfluencerTiktok,
        Channel::SocialProof,
    ];

    /// Full display label, as shown in selectors and tables.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::SocialFacebook => "Social (Facebook)",
            Channel::SocialInstagram => "Social (Instagram)",
            Channel::SocialTiktok => "Social (TikTok)",
            Channel::Display => "Display",
            Channel::Ctv => "CTV",
            Channel::Sms => "SMS",
            Channel::InfluencerInstagram => "Influencer (Instagram)",
            Channel::InfluencerTiktok => "Influencer (TikTok)",
            Channel::SocialProof => "Social Proof",
        }
    }

    /// Abbreviated label for compact journey-flow rendering.
    pub fn short_label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::SocialFacebook | Channel::SocialInstagram | Channel::SocialTiktok => "Social",
            Channel::Display => "Display",
            Channel::Ctv => "CTV",
            Channel::Sms => "SMS",
            Channel::InfluencerInstagram | Channel::InfluencerTiktok => "Influencer",
            Channel::SocialProof => "Social",
        }
    }

    /// Reporting group the channel rolls up into (Email, Influencer, Social,
    /// Display, CTV, SMS).
    pub fn group(&self) -> ChannelGroup {
        match self {
            Channel::Email => ChannelGroup::Email,
            Channel::InfluencerInstagram | Channel::InfluencerTiktok => ChannelGroup::Influencer,
            Channel::SocialFacebook
            | Channel::SocialInstagram
            | Channel::SocialTiktok
            | Channel::SocialProof => ChannelGroup::Social,
            Channel::Display => ChannelGroup::Display,
            Channel::Ctv => ChannelGroup::Ctv,
            Channel::Sms => ChannelGroup::Sms,
        }
    }
}

/// Roll-up grouping used by channel-level reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChannelGroup {
    Email,
    Influencer,
    Social,
    Display,
    Ctv,
    Sms,
}

impl ChannelGroup {
    pub const ALL: [ChannelGroup; 6] = [
        ChannelGroup::Email,
        ChannelGroup::Influencer,
        ChannelGroup::Social,
        ChannelGroup::Display,
        ChannelGroup::Ctv,
        ChannelGroup::Sms,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChannelGroup::Email => "Email",
            ChannelGroup::Influencer => "Influencer",
            ChannelGroup::Social => "Social",
            ChannelGroup::Display => "Display",
            ChannelGroup::Ctv => "CTV",
            ChannelGroup::Sms => "SMS",
        }
    }
}

// ─── Campaign objectives ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    IncreaseSales,
    BrandAwareness,
    AudienceGrowth,
    CustomerRetention,
    LeadGeneration,
}

impl Objective {
    pub const ALL: [Objective; 5] = [
        Objective::IncreaseSales,
        Objective::BrandAwareness,
        Objective::AudienceGrowth,
        Objective::CustomerRetention,
        Objective::LeadGeneration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Objective::IncreaseSales => "Increase Sales",
            Objective::BrandAwareness => "Brand Awareness",
            Objective::AudienceGrowth => "Audience Growth",
            Objective::CustomerRetention => "Customer Retention",
            Objective::LeadGeneration => "Lead Generation",
        }
    }

    /// The headline metric a simulation reports for this objective.
    pub fn key_metric(&self) -> &'static str {
        match self {
            Objective::IncreaseSales => "Conversion Rate",
            Objective::BrandAwareness => "Engagement Rate",
            Objective::AudienceGrowth => "Follower Acquisition",
            Objective::CustomerRetention => "Repeat Purchase Rate",
            Objective::LeadGeneration => "Lead Volume",
        }
    }
}

// ─── Plan building blocks ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Predefined,
    Custom,
}

/// One audience segment selected for a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceSegment {
    pub id: Uuid,
    pub name: String,
    /// Profile count.
    pub size: u64,
    pub kind: SegmentKind,
}

/// A creative messaging variant to compare.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreativeVariant {
    pub id: Uuid,
    pub name: String,
    pub approach: String,
    pub description: String,
}

/// An omnichannel journey path targeting one audience.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyPath {
    pub id: Uuid,
    pub name: String,
    pub target_audience: String,
    pub channels: Vec<Channel>,
}

// ─── Simulation lifecycle ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    Draft,
    Running,
    Completed,
}

/// Dashboard-level record of a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub id: Uuid,
    pub name: String,
    pub client: String,
    pub date: DateTime<Utc>,
    pub status: SimulationStatus,
    pub objective: Objective,
    pub key_metric: String,
    pub summary: String,
}
