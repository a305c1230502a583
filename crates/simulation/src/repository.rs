//! Result repository boundary.
//!
//! The presentation layer looks results up by id and stays ignorant of
//! whether they come from a live computation, a cache, or a store.

use dashmap::DashMap;
use uuid::Uuid;

use crate::result::SimulationResult;

/// Storage boundary for computed simulation results.
pub trait ResultRepository: Send + Sync {
    fn store(&self, result: SimulationResult);

    /// `None` means no result exists for that id; callers surface this as
    /// not-found rather than substituting a sample.
    fn lookup(&self, id: Uuid) -> Option<SimulationResult>;

    fn remove(&self, id: Uuid) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Thread-safe in-memory repository backed by DashMap.
///
/// Production: replace with a durable store behind the same trait.
pub struct InMemoryResultRepository {
    results: DashMap<Uuid, SimulationResult>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self {
            results: DashMap::new(),
        }
    }
}

impl ResultRepository for InMemoryResultRepository {
    fn store(&self, result: SimulationResult) {
        self.results.insert(result.id, result);
    }

    fn lookup(&self, id: Uuid) -> Option<SimulationResult> {
        self.results.get(&id).map(|r| r.value().clone())
    }

    fn remove(&self, id: Uuid) -> bool {
        self.results.remove(&id).is_some()
    }

    fn len(&self) -> usize {
        self.results.len()
    }
}

impl Default for InMemoryResultRepository {
    fn default() -> Self {
        Self::new()
    }
}
