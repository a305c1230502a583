//! Simulation execution: turns a submitted plan into a result, and stores
//! results behind a repository boundary.

pub mod engine;
pub mod repository;
pub mod result;

pub use engine::SimulationEngine;
pub use repository::{InMemoryResultRepository, ResultRepository};
pub use result::SimulationResult;
