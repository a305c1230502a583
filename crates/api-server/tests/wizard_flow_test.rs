//! Integration test for the full wizard flow: session creation, step
//! navigation, section edits, submission, and result lookup.

use intent_api::SimulatorStore;
use intent_core::config::SimulationConfig;
use intent_core::types::{Channel, Objective, SegmentKind, SimulationStatus};
use intent_core::SimulatorError;
use intent_reporting::channel_mix::{budget_recommendations, channel_mix};
use intent_reporting::FunnelBreakdown;
use intent_wizard::plan::CampaignDetailsPatch;
use intent_wizard::WizardStep;
use uuid::Uuid;

fn store() -> SimulatorStore {
    SimulatorStore::new(SimulationConfig {
        seed_demo_data: false,
        ..Default::default()
    })
}

#[test]
fn test_full_wizard_flow() {
    let store = store();
    let session = store.create_session("maya");
    assert_eq!(session.current_step, WizardStep::CampaignDetails);

    // Fill in campaign details, then walk forward through every step.
    store
        .with_session(session.id, |s| {
            s.update_campaign(CampaignDetailsPatch {
                name: Some("Velari ReNature Launch".to_string()),
                client: Some("Velari Threads".to_string()),
                objective: Some(Objective::IncreaseSales),
                description: Some("Sustainable apparel launch".to_string()),
            });
            Ok(())
        })
        .unwrap();

    for expected in [
        WizardStep::Audience,
        WizardStep::Creative,
        WizardStep::Journey,
        WizardStep::Review,
    ] {
        let updated = store.advance_session(session.id).unwrap();
        assert_eq!(updated.current_step, expected);
    }

    // Boundary idempotence at the terminal step.
    let at_review = store.advance_session(session.id).unwrap();
    assert_eq!(at_review.current_step, WizardStep::Review);
    assert!(!at_review.can_advance());
    assert!(at_review.can_retreat());

    // Submit and fetch the computed result.
    let simulation_id = store.submit_session(session.id, "maya").unwrap();
    let summary = store.get_simulation(simulation_id).unwrap();
    assert_eq!(summary.status, SimulationStatus::Completed);

    let result = store.get_result(simulation_id).unwrap();
    assert_eq!(result.name, "Velari ReNature Launch");
    assert_eq!(result.journeys.len(), 3);
    assert_eq!(result.creatives.len(), 2);

    // Derived display values compose over the result.
    let funnel = FunnelBreakdown::from_stages(&result.funnel);
    assert_eq!(funnel.stages.len(), 5);
    assert!(funnel.overall_conversion_pct > 0.0);
    assert!(funnel.overall_conversion_pct < 100.0);

    let mix = channel_mix(&result.channels);
    let total: f64 = mix.iter().map(|s| s.share_pct).sum();
    assert!((total - 100.0).abs() <= 3.0, "mix total was {total}");
    assert_eq!(
        budget_recommendations(&result.channels).len(),
        result.channels.len()
    );

    // Navigating away discards the session but not the stored result.
    assert!(store.delete_session(session.id, "maya"));
    assert!(store.get_session(session.id).is_none());
    assert!(store.get_result(simulation_id).is_ok());
}

#[test]
fn test_submission_payload_drives_the_result() {
    let store = store();

    let run = |campaign_name: &str, extra_channel: Option<Channel>| {
        let session = store.create_session("maya");
        store
            .with_session(session.id, |s| {
                s.update_campaign(CampaignDetailsPatch {
                    name: Some(campaign_name.to_string()),
                    client: Some("EcoStyle".to_string()),
                    objective: Some(Objective::BrandAwareness),
                    description: None,
                });
                if let Some(channel) = extra_channel {
                    s.add_path(
                        "SMS Blast".to_string(),
                        "Past High-Value Customers".to_string(),
                        vec![channel],
                    );
                }
                Ok(())
            })
            .unwrap();
        let id = store.submit_session(session.id, "maya").unwrap();
        store.get_result(id).unwrap()
    };

    let a = run("Plan A", None);
    let b = run("Plan B", Some(Channel::Sms));

    // Two different submissions produce two different results: the plan is
    // consumed, not replaced by a fixed sample.
    assert_ne!(a.id, b.id);
    assert_ne!(a.journeys, b.journeys);
    assert_eq!(a.journeys.len(), 3);
    assert_eq!(b.journeys.len(), 4);

    // And resubmitting identical content reproduces identical numbers.
    let a2 = run("Plan A", None);
    assert_eq!(a.journeys, a2.journeys);
    assert_eq!(a.funnel, a2.funnel);
}

#[test]
fn test_validation_and_error_paths() {
    let store = store();

    // Advancing a fresh session fails: campaign details are empty.
    let session = store.create_session("maya");
    let err = store.advance_session(session.id).unwrap_err();
    assert!(matches!(err, SimulatorError::Validation(_)));

    // Unknown session ids and unknown results are not-found.
    assert!(matches!(
        store.advance_session(Uuid::new_v4()).unwrap_err(),
        SimulatorError::NotFound(_)
    ));
    assert!(matches!(
        store.get_result(Uuid::new_v4()).unwrap_err(),
        SimulatorError::NotFound(_)
    ));

    // Unknown step identifiers are navigation errors.
    assert!(matches!(
        "summary".parse::<WizardStep>().unwrap_err(),
        SimulatorError::Navigation(_)
    ));
}

#[test]
fn test_section_edits_through_the_store() {
    let store = store();
    let session = store.create_session("maya");

    // Add a custom segment, then remove a prefilled one.
    let (added, _) = store
        .with_session(session.id, |s| {
            Ok(s.add_segment(
                "Lapsed Loyalty Members".to_string(),
                12_000,
                SegmentKind::Custom,
            ))
        })
        .unwrap();

    let current = store.get_session(session.id).unwrap();
    assert_eq!(current.plan.segments.len(), 4);
    let prefilled_id = current.plan.segments[0].id;

    let (removed, after) = store
        .with_session(session.id, |s| Ok(s.remove_segment(prefilled_id)))
        .unwrap();
    assert!(removed);
    assert_eq!(after.plan.segments.len(), 3);
    assert!(after.plan.segments.iter().any(|s| s.id == added));

    // Other sections were untouched throughout.
    assert_eq!(after.plan.variants.len(), 2);
    assert_eq!(after.plan.paths.len(), 3);
}
