//! In-memory simulator store backed by DashMap.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store.
//! This provides the same API surface for development and testing.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use intent_core::config::SimulationConfig;
use intent_core::types::{Objective, SimulationStatus, SimulationSummary};
use intent_core::{SimulatorError, SimulatorResult};
use intent_simulation::{InMemoryResultRepository, ResultRepository, SimulationEngine, SimulationResult};
use intent_wizard::plan::{CampaignDetailsPatch, SimulationPlan};
use intent_wizard::{WizardSession, WizardStep};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::models::{AuditAction, AuditLogEntry};

/// Thread-safe in-memory store for wizard sessions, simulation summaries,
/// computed results, and the audit log.
pub struct SimulatorStore {
    sessions: DashMap<Uuid, WizardSession>,
    simulations: DashMap<Uuid, SimulationSummary>,
    audit_log: DashMap<Uuid, AuditLogEntry>,
    engine: SimulationEngine,
    results: Arc<dyn ResultRepository>,
}

impl SimulatorStore {
    pub fn new(config: SimulationConfig) -> Self {
        info!("Simulator store initialized (in-memory, development mode)");
        let seed = config.seed_demo_data;
        let store = Self {
            sessions: DashMap::new(),
            simulations: DashMap::new(),
            audit_log: DashMap::new(),
            engine: SimulationEngine::new(config),
            results: Arc::new(InMemoryResultRepository::new()),
        };
        if seed {
            store.seed_demo_data();
        }
        store
    }

    // ─── Wizard sessions ────────────────────────────────────────────────────

    pub fn create_session(&self, user: &str) -> WizardSession {
        let session = WizardSession::new();
        let id = session.id;
        self.sessions.insert(id, session.clone());
        self.log_audit(
            user,
            AuditAction::Create,
            "wizard_session",
            &id.to_string(),
            serde_json::json!({}),
        );
        session
    }

    pub fn get_session(&self, id: Uuid) -> Option<WizardSession> {
        self.sessions.get(&id).map(|r| r.value().clone())
    }

    /// Discard a session and all its progress.
    pub fn delete_session(&self, id: Uuid, user: &str) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            self.log_audit(
                user,
                AuditAction::Delete,
                "wizard_session",
                &id.to_string(),
                serde_json::json!({}),
            );
        }
        removed
    }

    /// Run a closure against a session under its map lock, returning the
    /// updated session.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut WizardSession) -> SimulatorResult<T>,
    ) -> SimulatorResult<(T, WizardSession)> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| SimulatorError::NotFound(format!("wizard session {id}")))?;
        let session = entry.value_mut();
        let out = f(session)?;
        Ok((out, session.clone()))
    }

    /// Apply a section edit to a session and record it in the audit log.
    pub fn edit_session<T>(
        &self,
        id: Uuid,
        user: &str,
        section: &str,
        f: impl FnOnce(&mut WizardSession) -> SimulatorResult<T>,
    ) -> SimulatorResult<(T, WizardSession)> {
        let out = self.with_session(id, f)?;
        self.log_audit(
            user,
            AuditAction::Update,
            "wizard_session",
            &id.to_string(),
            serde_json::json!({"section": section}),
        );
        Ok(out)
    }

    pub fn advance_session(&self, id: Uuid) -> SimulatorResult<WizardSession> {
        let (_, session) = self.with_session(id, |s| s.advance())?;
        Ok(session)
    }

    pub fn retreat_session(&self, id: Uuid) -> SimulatorResult<WizardSession> {
        let (_, session) = self.with_session(id, |s| Ok(s.retreat()))?;
        Ok(session)
    }

    pub fn goto_session(&self, id: Uuid, step: WizardStep) -> SimulatorResult<WizardSession> {
        let (_, session) = self.with_session(id, |s| {
            s.goto(step);
            Ok(())
        })?;
        Ok(session)
    }

    /// Terminal wizard action: validate, execute the plan, record the
    /// summary, and store the computed result under the new simulation id.
    pub fn submit_session(&self, id: Uuid, user: &str) -> SimulatorResult<Uuid> {
        let session = self
            .get_session(id)
            .ok_or_else(|| SimulatorError::NotFound(format!("wizard session {id}")))?;
        let plan = session.submit()?;
        let result = self.engine.run(&plan)?;
        let simulation_id = result.id;

        let objective = plan.campaign.objective.unwrap_or(Objective::IncreaseSales);
        self.simulations.insert(
            simulation_id,
            SimulationSummary {
                id: simulation_id,
                name: plan.campaign.name.clone(),
                client: plan.campaign.client.clone(),
                date: result.completed_at,
                status: SimulationStatus::Completed,
                objective,
                key_metric: objective.key_metric().to_string(),
                summary: format!(
                    "Predicted {}% lift in conversion",
                    result.overview.predicted_lift_pct
                ),
            },
        );
        self.results.store(result);
        self.log_audit(
            user,
            AuditAction::Submit,
            "simulation",
            &simulation_id.to_string(),
            serde_json::json!({"name": plan.campaign.name, "session": id}),
        );
        Ok(simulation_id)
    }

    // ─── Simulations ────────────────────────────────────────────────────────

    pub fn list_simulations(&self) -> Vec<SimulationSummary> {
        let mut simulations: Vec<SimulationSummary> =
            self.simulations.iter().map(|r| r.value().clone()).collect();
        simulations.sort_by(|a, b| b.date.cmp(&a.date));
        simulations
    }

    pub fn get_simulation(&self, id: Uuid) -> Option<SimulationSummary> {
        self.simulations.get(&id).map(|r| r.value().clone())
    }

    /// Look up the computed result for a simulation. A missing result is an
    /// explicit not-found, never a substituted sample.
    pub fn get_result(&self, id: Uuid) -> SimulatorResult<SimulationResult> {
        self.results
            .lookup(id)
            .ok_or_else(|| SimulatorError::NotFound(format!("result for simulation {id}")))
    }

    pub fn duplicate_simulation(&self, id: Uuid, user: &str) -> Option<SimulationSummary> {
        let source = self.get_simulation(id)?;
        let copy = SimulationSummary {
            id: Uuid::new_v4(),
            name: format!("{} (Copy)", source.name),
            date: Utc::now(),
            status: SimulationStatus::Draft,
            summary: "Draft ready for configuration".to_string(),
            ..source
        };
        let copy_id = copy.id;
        self.simulations.insert(copy_id, copy.clone());
        self.log_audit(
            user,
            AuditAction::Duplicate,
            "simulation",
            &copy_id.to_string(),
            serde_json::json!({"source": id}),
        );
        Some(copy)
    }

    pub fn delete_simulation(&self, id: Uuid, user: &str) -> bool {
        let removed = self.simulations.remove(&id).is_some();
        if removed {
            // Drop the computed result along with its summary.
            self.results.remove(id);
            self.log_audit(
                user,
                AuditAction::Delete,
                "simulation",
                &id.to_string(),
                serde_json::json!({}),
            );
        }
        removed
    }

    /// Dashboard quick stats across all completed simulations.
    pub fn overview(&self) -> (u64, u64, f64, String) {
        let simulations = self.list_simulations();
        let total = simulations.len() as u64;
        let completed: Vec<_> = simulations
            .iter()
            .filter(|s| s.status == SimulationStatus::Completed)
            .collect();

        let mut lift_sum = 0.0;
        let mut lift_count = 0u64;
        let mut channel_counts: std::collections::HashMap<String, u64> =
            std::collections::HashMap::new();
        for sim in &completed {
            if let Some(result) = self.results.lookup(sim.id) {
                lift_sum += result.overview.predicted_lift_pct;
                lift_count += 1;
                *channel_counts
                    .entry(result.overview.best_channel.clone())
                    .or_default() += 1;
            }
        }

        let avg_lift = if lift_count > 0 {
            ((lift_sum / lift_count as f64) * 10.0).round() / 10.0
        } else {
            0.0
        };
        let best_channel = channel_counts
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(channel, _)| channel)
            .unwrap_or_else(|| "n/a".to_string());

        (total, completed.len() as u64, avg_lift, best_channel)
    }

    // ─── Audit log ──────────────────────────────────────────────────────────

    fn log_audit(
        &self,
        user: &str,
        action: AuditAction,
        resource_type: &str,
        resource_id: &str,
        details: serde_json::Value,
    ) {
        let entry = AuditLogEntry {
            id: Uuid::new_v4(),
            user: user.to_string(),
            action,
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
            details,
            timestamp: Utc::now(),
        };
        self.audit_log.insert(entry.id, entry);
    }

    pub fn get_audit_log(&self) -> Vec<AuditLogEntry> {
        let mut entries: Vec<AuditLogEntry> =
            self.audit_log.iter().map(|r| r.value().clone()).collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    // ─── Demo data ──────────────────────────────────────────────────────────

    fn seed_demo_data(&self) {
        let now = Utc::now();

        // Completed runs get a real computed result attached.
        let completed = [
            (
                "Velari ReNature Launch",
                "Velari Threads",
                Objective::IncreaseSales,
                1i64,
            ),
            (
                "Earth Day Social Media Push",
                "EcoStyle",
                Objective::AudienceGrowth,
                8,
            ),
            (
                "Post-Purchase Journey Optimization",
                "NatureCo",
                Objective::CustomerRetention,
                12,
            ),
        ];

        for (name, client, objective, days_ago) in completed {
            let mut plan = SimulationPlan::prefilled();
            plan.apply_campaign_patch(CampaignDetailsPatch {
                name: Some(name.to_string()),
                client: Some(client.to_string()),
                objective: Some(objective),
                description: None,
            });
            let result = match self.engine.run(&plan) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(error = %e, name, "failed to seed demo simulation");
                    continue;
                }
            };
            let id = result.id;
            self.simulations.insert(
                id,
                SimulationSummary {
                    id,
                    name: name.to_string(),
                    client: client.to_string(),
                    date: now - Duration::days(days_ago),
                    status: SimulationStatus::Completed,
                    objective,
                    key_metric: objective.key_metric().to_string(),
                    summary: format!(
                        "Predicted {}% lift in conversion",
                        result.overview.predicted_lift_pct
                    ),
                },
            );
            self.results.store(result);
        }

        // One still running, one draft — neither has a result yet.
        let pending = [
            (
                "Spring Collection Email Campaign",
                "Velari Threads",
                Objective::BrandAwareness,
                SimulationStatus::Running,
                "Simulation in progress",
                3i64,
            ),
            (
                "Summer Campaign Draft",
                "Velari Threads",
                Objective::IncreaseSales,
                SimulationStatus::Draft,
                "Draft ready for configuration",
                15,
            ),
        ];
        for (name, client, objective, status, summary, days_ago) in pending {
            let id = Uuid::new_v4();
            self.simulations.insert(
                id,
                SimulationSummary {
                    id,
                    name: name.to_string(),
                    client: client.to_string(),
                    date: now - Duration::days(days_ago),
                    status,
                    objective,
                    key_metric: objective.key_metric().to_string(),
                    summary: summary.to_string(),
                },
            );
        }

        info!(simulations = self.simulations.len(), "demo data seeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intent_core::types::SegmentKind;

    fn store() -> SimulatorStore {
        SimulatorStore::new(SimulationConfig::default())
    }

    fn unseeded_store() -> SimulatorStore {
        SimulatorStore::new(SimulationConfig {
            seed_demo_data: false,
            ..Default::default()
        })
    }

    fn fill_campaign(store: &SimulatorStore, id: Uuid) {
        store
            .with_session(id, |s| {
                s.update_campaign(CampaignDetailsPatch {
                    name: Some("Store Test Campaign".to_string()),
                    client: Some("NatureCo".to_string()),
                    objective: Some(Objective::LeadGeneration),
                    description: None,
                });
                Ok(())
            })
            .unwrap();
    }

    // 1. Seeding -------------------------------------------------------------

    #[test]
    fn test_seeded_store_has_demo_simulations() {
        let store = store();
        let sims = store.list_simulations();
        assert_eq!(sims.len(), 5);

        // Completed seeds have results, pending ones do not.
        for sim in sims {
            match sim.status {
                SimulationStatus::Completed => assert!(store.get_result(sim.id).is_ok()),
                _ => assert!(matches!(
                    store.get_result(sim.id),
                    Err(SimulatorError::NotFound(_))
                )),
            }
        }
    }

    #[test]
    fn test_unseeded_store_is_empty() {
        assert!(unseeded_store().list_simulations().is_empty());
    }

    // 2. Session lifecycle ---------------------------------------------------

    #[test]
    fn test_session_create_get_delete() {
        let store = unseeded_store();
        let session = store.create_session("maya");
        assert!(store.get_session(session.id).is_some());
        assert!(store.delete_session(session.id, "maya"));
        assert!(store.get_session(session.id).is_none());
        assert!(!store.delete_session(session.id, "maya"));
    }

    #[test]
    fn test_advance_on_missing_session_is_not_found() {
        let store = unseeded_store();
        let err = store.advance_session(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, SimulatorError::NotFound(_)));
    }

    // 3. Submission ----------------------------------------------------------

    #[test]
    fn test_submit_stores_summary_and_result() {
        let store = unseeded_store();
        let session = store.create_session("maya");
        fill_campaign(&store, session.id);

        let simulation_id = store.submit_session(session.id, "maya").unwrap();

        let summary = store.get_simulation(simulation_id).unwrap();
        assert_eq!(summary.name, "Store Test Campaign");
        assert_eq!(summary.status, SimulationStatus::Completed);
        assert_eq!(summary.key_metric, "Lead Volume");

        let result = store.get_result(simulation_id).unwrap();
        assert_eq!(result.name, "Store Test Campaign");
    }

    #[test]
    fn test_submit_unvalidated_session_fails() {
        let store = unseeded_store();
        let session = store.create_session("maya");
        let err = store.submit_session(session.id, "maya").unwrap_err();
        assert!(matches!(err, SimulatorError::Validation(_)));
        assert!(store.list_simulations().is_empty());
    }

    // 4. Dashboard actions ---------------------------------------------------

    #[test]
    fn test_duplicate_creates_draft_without_result() {
        let store = store();
        let completed = store
            .list_simulations()
            .into_iter()
            .find(|s| s.status == SimulationStatus::Completed)
            .unwrap();

        let copy = store.duplicate_simulation(completed.id, "maya").unwrap();
        assert!(copy.name.ends_with("(Copy)"));
        assert_eq!(copy.status, SimulationStatus::Draft);
        assert!(store.get_result(copy.id).is_err());
    }

    #[test]
    fn test_delete_simulation_drops_result() {
        let store = store();
        let completed = store
            .list_simulations()
            .into_iter()
            .find(|s| s.status == SimulationStatus::Completed)
            .unwrap();

        assert!(store.delete_simulation(completed.id, "maya"));
        assert!(store.get_simulation(completed.id).is_none());
        assert!(store.get_result(completed.id).is_err());
    }

    #[test]
    fn test_overview_aggregates_completed_runs() {
        let store = store();
        let (total, completed, avg_lift, best_channel) = store.overview();
        assert_eq!(total, 5);
        assert_eq!(completed, 3);
        assert!(avg_lift > 0.0);
        assert_ne!(best_channel, "n/a");
    }

    // 5. Audit ---------------------------------------------------------------

    #[test]
    fn test_audit_log_records_mutations() {
        let store = unseeded_store();
        let session = store.create_session("maya");
        fill_campaign(&store, session.id);
        store.submit_session(session.id, "maya").unwrap();
        store.delete_session(session.id, "maya");

        let log = store.get_audit_log();
        assert!(log.iter().any(|e| e.action == AuditAction::Create));
        assert!(log.iter().any(|e| e.action == AuditAction::Submit));
        assert!(log.iter().any(|e| e.action == AuditAction::Delete));
    }

    #[test]
    fn test_section_edits_log_update_entries() {
        let store = unseeded_store();
        let session = store.create_session("maya");

        store
            .edit_session(session.id, "maya", "audience", |s| {
                Ok(s.add_segment("Lapsed Buyers".to_string(), 5_000, SegmentKind::Custom))
            })
            .unwrap();

        let updates: Vec<_> = store
            .get_audit_log()
            .into_iter()
            .filter(|e| e.action == AuditAction::Update)
            .collect();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].resource_id, session.id.to_string());
        assert_eq!(updates[0].details["section"], "audience");
    }
}
