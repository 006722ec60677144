//! End-to-end onboarding flow over the in-memory adapters: gate
//! redirects, full wizard walk-through, terminal completion, and the
//! post-completion gate short-circuit.

use std::sync::Arc;

use chrono::Utc;
use sd_app::deps::AppDeps;
use sd_app::usecases::onboarding::{
    CompleteSetup, GateDecision, PersistProgress, SetupGate, WizardSession,
};
use sd_core::company::Company;
use sd_core::ids::{CompanyId, UserId};
use sd_core::onboarding::{WizardEvent, WizardStep};
use sd_core::ports::{CompanyRepositoryPort as _, IdentityPort as _, SetupProgressPort as _};
use sd_infra::company::MemoryCompanyRepository;
use sd_infra::events::TracingWizardEvents;
use sd_infra::identity::MemoryIdentityProvider;
use sd_infra::progress::MemorySetupProgressRepository;
use sd_infra::session::MemorySessionFlags;
use sd_infra::time::SystemClock;

struct Harness {
    deps: AppDeps,
    companies: Arc<MemoryCompanyRepository>,
}

fn harness() -> Harness {
    let identity = Arc::new(MemoryIdentityProvider::new("owner-1"));
    let claims_service = identity.claims_service();
    let companies = Arc::new(MemoryCompanyRepository::new());
    let deps = AppDeps {
        companies: companies.clone(),
        progress: Arc::new(MemorySetupProgressRepository::new()),
        identity,
        claims_service,
        session_flags: Arc::new(MemorySessionFlags::new()),
        wizard_events: Arc::new(TracingWizardEvents),
        clock: Arc::new(SystemClock),
    };
    Harness { deps, companies }
}

fn gate(deps: &AppDeps) -> SetupGate {
    SetupGate::new(
        deps.identity.clone(),
        deps.companies.clone(),
        deps.session_flags.clone(),
    )
}

fn session(deps: &AppDeps) -> WizardSession {
    let persist = Arc::new(PersistProgress::new(
        deps.identity.clone(),
        deps.companies.clone(),
        deps.progress.clone(),
        deps.clock.clone(),
    ));
    let complete = Arc::new(CompleteSetup::new(
        deps.identity.clone(),
        deps.companies.clone(),
        deps.claims_service.clone(),
        deps.progress.clone(),
        deps.session_flags.clone(),
        deps.clock.clone(),
    ));
    WizardSession::new(
        persist,
        complete,
        deps.identity.clone(),
        deps.companies.clone(),
        deps.progress.clone(),
        deps.wizard_events.clone(),
    )
}

async fn walk_to_review(session: &WizardSession) {
    session
        .apply(WizardEvent::SetBusinessInfo {
            business_name: "Bella Salon".to_string(),
            business_type: "barbershop".to_string(),
            main_services: ["haircut", "beard"].iter().map(|s| s.to_string()).collect(),
            owner_position: "owner".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.advance().await.unwrap().step, WizardStep::Locations);

    let mut main = session.state().await.record.branches[0].clone();
    main.name = "Main".to_string();
    main.address = "123 St".to_string();
    main.phone = "0100000000".to_string();
    session
        .apply(WizardEvent::UpsertBranch { branch: main })
        .await
        .unwrap();
    assert_eq!(session.advance().await.unwrap().step, WizardStep::TeamSize);

    session
        .apply(WizardEvent::SetEmployeeCount { count: 3 })
        .await
        .unwrap();
    assert_eq!(session.advance().await.unwrap().step, WizardStep::Theme);

    session
        .apply(WizardEvent::SelectTheme {
            theme_id: "classic".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(session.advance().await.unwrap().step, WizardStep::Review);
}

#[tokio::test]
async fn fresh_identity_is_routed_into_the_wizard() {
    let h = harness();
    assert_eq!(gate(&h.deps).evaluate().await, GateDecision::RedirectToSetup);
}

#[tokio::test]
async fn incomplete_company_still_redirects() {
    let h = harness();
    h.companies.insert(Company::new_trial(
        CompanyId::new(),
        UserId::from("owner-1"),
        Utc::now(),
    ));
    assert_eq!(gate(&h.deps).evaluate().await, GateDecision::RedirectToSetup);
}

#[tokio::test]
async fn complete_onboarding_then_pass_the_gate() {
    let h = harness();
    let gate = gate(&h.deps);
    assert_eq!(gate.evaluate().await, GateDecision::RedirectToSetup);

    let session = session(&h.deps);
    walk_to_review(&session).await;
    session.submit().await.unwrap();

    // Company record finalized.
    let claims = h.deps.identity.claims().await.unwrap();
    let company_id = claims.company_id.clone().expect("claims carry company");
    let company = h.companies.get(&company_id).await.unwrap().unwrap();
    assert!(company.setup_completed);
    assert!(company.setup_completed_at.is_some());
    assert_eq!(company.name, "Bella Salon");
    assert_eq!(h.companies.branches(&company_id).len(), 1);
    assert!(h.companies.primary_location(&company_id).is_some());

    // First navigation consumes the one-shot flag.
    assert_eq!(gate.evaluate().await, GateDecision::Allowed);
    // Later navigations take the full path through refreshed claims.
    assert_eq!(gate.evaluate().await, GateDecision::Allowed);
}

#[tokio::test]
async fn checkpoints_land_once_a_company_exists() {
    let h = harness();
    // A company from an earlier partial run resolves via owner lookup.
    let company = Company::new_trial(CompanyId::new(), UserId::from("owner-1"), Utc::now());
    let company_id = company.id.clone();
    h.companies.insert(company);

    let session = session(&h.deps);
    walk_to_review(&session).await;

    // Checkpoints are fire-and-forget; give the spawned saves a beat.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let saved = h.deps.progress.load(&company_id).await.unwrap().unwrap();
    assert_eq!(saved.step, WizardStep::Review);
    assert_eq!(saved.record.business_name, "Bella Salon");
}
