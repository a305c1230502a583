//! Wizard session logic: the five-step configuration flow that accumulates
//! a simulation plan and hands it off for execution.

pub mod controller;
pub mod plan;
pub mod step;

pub use controller::WizardSession;
pub use plan::SimulationPlan;
pub use step::WizardStep;
