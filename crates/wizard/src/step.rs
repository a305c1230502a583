//! Wizard step state machine.
//!
//! The step sequence is a fixed total order with no branching. Adjacency is
//! encoded in an explicit transition table rather than derived by searching
//! a list for the current value, so an out-of-range state is unrepresentable.

use std::fmt;
use std::str::FromStr;

use intent_core::SimulatorError;
use serde::{Deserialize, Serialize};

/// One step of the configuration wizard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    CampaignDetails,
    Audience,
    Creative,
    Journey,
    Review,
}

impl WizardStep {
    /// The full step sequence, in order. Fixed for the lifetime of a session.
    pub const SEQUENCE: [WizardStep; 5] = [
        WizardStep::CampaignDetails,
        WizardStep::Audience,
        WizardStep::Creative,
        WizardStep::Journey,
        WizardStep::Review,
    ];

    /// Position within the sequence.
    pub fn index(&self) -> usize {
        match self {
            WizardStep::CampaignDetails => 0,
            WizardStep::Audience => 1,
            WizardStep::Creative => 2,
            WizardStep::Journey => 3,
            WizardStep::Review => 4,
        }
    }

    /// The step after this one, or `None` at the end of the sequence.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CampaignDetails => Some(WizardStep::Audience),
            WizardStep::Audience => Some(WizardStep::Creative),
            WizardStep::Creative => Some(WizardStep::Journey),
            WizardStep::Journey => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    /// The step before this one, or `None` at the start of the sequence.
    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CampaignDetails => None,
            WizardStep::Audience => Some(WizardStep::CampaignDetails),
            WizardStep::Creative => Some(WizardStep::Audience),
            WizardStep::Journey => Some(WizardStep::Creative),
            WizardStep::Review => Some(WizardStep::Journey),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WizardStep::Review)
    }

    /// Kebab-case identifier used on the wire and in routes.
    pub fn identifier(&self) -> &'static str {
        match self {
            WizardStep::CampaignDetails => "campaign-details",
            WizardStep::Audience => "audience",
            WizardStep::Creative => "creative",
            WizardStep::Journey => "journey",
            WizardStep::Review => "review",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for WizardStep {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "campaign-details" => Ok(WizardStep::CampaignDetails),
            "audience" => Ok(WizardStep::Audience),
            "creative" => Ok(WizardStep::Creative),
            "journey" => Ok(WizardStep::Journey),
            "review" => Ok(WizardStep::Review),
            other => Err(SimulatorError::Navigation(format!(
                "unknown wizard step '{other}'"
            ))),
        }
    }
}
