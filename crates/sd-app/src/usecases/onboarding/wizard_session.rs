//! Wizard session.
//!
//! Drives the pure wizard state machine and executes the actions it
//! returns: checkpoints are spawned fire-and-forget, theme previews
//! and state snapshots are pushed through the event port, and the
//! terminal submit is awaited with its failure surfaced to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use sd_core::ids::CompanyId;
use sd_core::onboarding::{
    SetupProgress, WizardAction, WizardEvent, WizardState, WizardStateMachine,
};
use sd_core::ports::{
    CompanyRepositoryPort, IdentityPort, SetupProgressPort, WizardEventPort,
};

use super::complete_setup::{CompleteSetup, CompleteSetupError};
use super::persist_progress::PersistProgress;

/// Errors surfaced to the shell by the wizard session.
#[derive(Debug, thiserror::Error)]
pub enum WizardSessionError {
    /// A previous submit is still outstanding; actions are disabled
    /// until it settles (busy flag, not a queue).
    #[error("another operation is in progress")]
    Busy,
    #[error(transparent)]
    Completion(#[from] CompleteSetupError),
}

/// One identity drives one wizard instance; no multi-writer
/// coordination is modeled.
pub struct WizardSession {
    state: Mutex<WizardState>,
    busy: AtomicBool,
    seeded: AtomicBool,

    persist_progress: Arc<PersistProgress>,
    complete_setup: Arc<CompleteSetup>,
    identity: Arc<dyn IdentityPort>,
    companies: Arc<dyn CompanyRepositoryPort>,
    progress: Arc<dyn SetupProgressPort>,
    events: Arc<dyn WizardEventPort>,
}

impl WizardSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        persist_progress: Arc<PersistProgress>,
        complete_setup: Arc<CompleteSetup>,
        identity: Arc<dyn IdentityPort>,
        companies: Arc<dyn CompanyRepositoryPort>,
        progress: Arc<dyn SetupProgressPort>,
        events: Arc<dyn WizardEventPort>,
    ) -> Self {
        Self {
            state: Mutex::new(WizardState::default()),
            busy: AtomicBool::new(false),
            seeded: AtomicBool::new(false),
            persist_progress,
            complete_setup,
            identity,
            companies,
            progress,
            events,
        }
    }

    /// Current state snapshot.
    pub async fn state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Seed the session from a saved checkpoint, once. Checkpoint
    /// loading is best-effort: any failure starts the wizard fresh.
    pub async fn resume(&self) -> WizardState {
        if !self.seeded.swap(true, Ordering::SeqCst) {
            match self.load_checkpoint().await {
                Ok(Some(saved)) => {
                    info!(step = ?saved.step, "wizard resumed from checkpoint");
                    *self.state.lock().await = WizardState::resumed(saved.step, saved.record);
                }
                Ok(None) => {}
                Err(error) => {
                    warn!(%error, "failed to load setup checkpoint, starting fresh");
                }
            }
        }
        self.state().await
    }

    /// Advance to the next step; rejected while a submit is
    /// outstanding, blocked by validation otherwise.
    pub async fn advance(&self) -> Result<WizardState, WizardSessionError> {
        self.guarded(WizardEvent::Advance).await
    }

    /// Go back one step.
    pub async fn retreat(&self) -> Result<WizardState, WizardSessionError> {
        self.guarded(WizardEvent::Retreat).await
    }

    /// Apply a field-mutation event.
    pub async fn apply(&self, event: WizardEvent) -> Result<WizardState, WizardSessionError> {
        self.guarded(event).await
    }

    /// Run the terminal submit from the review step.
    pub async fn submit(&self) -> Result<WizardState, WizardSessionError> {
        self.guarded(WizardEvent::Submit).await
    }

    async fn guarded(&self, event: WizardEvent) -> Result<WizardState, WizardSessionError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(WizardSessionError::Busy);
        }
        let result = self.dispatch(event).await;
        self.busy.store(false, Ordering::SeqCst);
        result
    }

    async fn dispatch(&self, event: WizardEvent) -> Result<WizardState, WizardSessionError> {
        // The state lock serializes dispatches so two callers never
        // transition from the same snapshot.
        let mut guard = self.state.lock().await;
        let from = guard.step;
        let (next, actions) = WizardStateMachine::transition(guard.clone(), event);
        info!(?from, to = ?next.step, "wizard transition");
        *guard = next.clone();
        drop(guard);

        for action in actions {
            match action {
                WizardAction::PersistProgress { step, record } => {
                    self.persist_progress.fire_and_forget(step, record);
                }
                WizardAction::PreviewTheme { theme } => {
                    self.events.theme_preview(&theme).await;
                }
                WizardAction::CompleteSetup { record } => {
                    self.complete_setup.execute(record).await?;
                }
            }
        }
        self.events.state_changed(&next).await;
        Ok(next)
    }

    async fn load_checkpoint(&self) -> anyhow::Result<Option<SetupProgress>> {
        let Some(company_id) = self.resolve_company_id().await? else {
            return Ok(None);
        };
        // A company that already finished setup never re-enters the
        // wizard; the gate handles that path.
        self.progress.load(&company_id).await
    }

    async fn resolve_company_id(&self) -> anyhow::Result<Option<CompanyId>> {
        let claims = self.identity.claims().await?;
        if let Some(id) = claims.company_id {
            return Ok(Some(id));
        }
        let user = self.identity.current_user().await?;
        Ok(self
            .companies
            .find_by_owner(&user.user_id)
            .await?
            .map(|company| company.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use sd_core::catalog::ThemeSnapshot;
    use sd_core::identity::AuthClaims;
    use sd_core::onboarding::{SetupRecord, WizardStep};
    use sd_core::ports::SetupProgressPort as _;
    use sd_infra::company::MemoryCompanyRepository;
    use sd_infra::identity::MemoryIdentityProvider;
    use sd_infra::progress::MemorySetupProgressRepository;
    use sd_infra::session::MemorySessionFlags;
    use sd_infra::time::FixedClock;

    /// Event port that records everything pushed to the shell.
    #[derive(Default)]
    struct RecordingEvents {
        states: std::sync::Mutex<Vec<WizardState>>,
        previews: std::sync::Mutex<Vec<ThemeSnapshot>>,
    }

    #[async_trait]
    impl WizardEventPort for RecordingEvents {
        async fn state_changed(&self, state: &WizardState) {
            self.states.lock().unwrap().push(state.clone());
        }

        async fn theme_preview(&self, theme: &ThemeSnapshot) {
            self.previews.lock().unwrap().push(theme.clone());
        }
    }

    struct Fixture {
        session: WizardSession,
        identity: Arc<MemoryIdentityProvider>,
        companies: Arc<MemoryCompanyRepository>,
        progress: Arc<MemorySetupProgressRepository>,
        events: Arc<RecordingEvents>,
    }

    fn fixture() -> Fixture {
        fixture_with_claims(AuthClaims::default())
    }

    fn fixture_with_claims(claims: AuthClaims) -> Fixture {
        let identity = Arc::new(MemoryIdentityProvider::new("user-1").with_claims(claims));
        let companies = Arc::new(MemoryCompanyRepository::new());
        let progress = Arc::new(MemorySetupProgressRepository::new());
        let flags = Arc::new(MemorySessionFlags::new());
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let events = Arc::new(RecordingEvents::default());

        let persist_progress = Arc::new(PersistProgress::new(
            identity.clone(),
            companies.clone(),
            progress.clone(),
            clock.clone(),
        ));
        let complete_setup = Arc::new(CompleteSetup::new(
            identity.clone(),
            companies.clone(),
            identity.claims_service(),
            progress.clone(),
            flags,
            clock,
        ));
        let session = WizardSession::new(
            persist_progress,
            complete_setup,
            identity.clone(),
            companies.clone(),
            progress.clone(),
            events.clone(),
        );
        Fixture {
            session,
            identity,
            companies,
            progress,
            events,
        }
    }

    fn filled_record() -> SetupRecord {
        let mut record = SetupRecord::default();
        record.business_name = "Bella Salon".to_string();
        record.business_type = "barbershop".to_string();
        record.main_services = ["haircut", "beard"].iter().map(|s| s.to_string()).collect();
        record.owner_position = "owner".to_string();
        record.branches[0].name = "Main".to_string();
        record.branches[0].address = "123 St".to_string();
        record.branches[0].phone = "0100000000".to_string();
        record.employee_count = 3;
        record.theme_id = "classic".to_string();
        record
    }

    #[tokio::test]
    async fn advance_blocked_by_validation_keeps_step() {
        let f = fixture();
        let state = f.session.advance().await.unwrap();
        assert_eq!(state.step, WizardStep::BusinessInfo);
        assert!(!state.errors.is_empty());
    }

    #[tokio::test]
    async fn theme_selection_pushes_live_preview() {
        let f = fixture();
        f.session
            .apply(WizardEvent::SelectTheme {
                theme_id: "rose".to_string(),
            })
            .await
            .unwrap();
        let previews = f.events.previews.lock().unwrap();
        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].id, "rose");
    }

    #[tokio::test]
    async fn every_dispatch_emits_a_state_snapshot() {
        let f = fixture();
        f.session.advance().await.unwrap();
        f.session.retreat().await.unwrap();
        assert_eq!(f.events.states.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn full_walk_through_completes_setup() {
        let f = fixture();
        f.session
            .apply(WizardEvent::SetBusinessInfo {
                business_name: "Bella Salon".to_string(),
                business_type: "barbershop".to_string(),
                main_services: ["haircut", "beard"].iter().map(|s| s.to_string()).collect(),
                owner_position: "owner".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(f.session.advance().await.unwrap().step, WizardStep::Locations);

        let state = f.session.state().await;
        let mut main = state.record.branches[0].clone();
        main.name = "Main".to_string();
        main.address = "123 St".to_string();
        main.phone = "0100000000".to_string();
        f.session
            .apply(WizardEvent::UpsertBranch { branch: main })
            .await
            .unwrap();
        assert_eq!(f.session.advance().await.unwrap().step, WizardStep::TeamSize);

        f.session
            .apply(WizardEvent::SetEmployeeCount { count: 3 })
            .await
            .unwrap();
        assert_eq!(f.session.advance().await.unwrap().step, WizardStep::Theme);

        f.session
            .apply(WizardEvent::SelectTheme {
                theme_id: "classic".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(f.session.advance().await.unwrap().step, WizardStep::Review);

        f.session.submit().await.unwrap();

        let claims = f.identity.claims().await.unwrap();
        let company_id = claims.company_id.expect("claims refreshed with company");
        let company = f.companies.get(&company_id).await.unwrap().unwrap();
        assert!(company.setup_completed);
    }

    #[tokio::test]
    async fn submit_failure_leaves_wizard_resubmittable() {
        let f = fixture();
        seed_to_review(&f).await;
        f.companies.fail_on_commit(
            sd_core::ports::CompanyRepositoryError::Unavailable("offline".to_string()),
        );

        let error = f.session.submit().await.unwrap_err();
        assert!(matches!(
            error,
            WizardSessionError::Completion(CompleteSetupError::Network(_))
        ));
        assert_eq!(f.session.state().await.step, WizardStep::Review);

        // The busy flag was released; the retry goes through.
        f.session.submit().await.unwrap();
    }

    #[tokio::test]
    async fn busy_flag_rejects_actions_while_an_operation_is_outstanding() {
        let f = fixture();
        f.session.busy.store(true, Ordering::SeqCst);
        assert!(matches!(
            f.session.advance().await.unwrap_err(),
            WizardSessionError::Busy
        ));
        assert!(matches!(
            f.session.submit().await.unwrap_err(),
            WizardSessionError::Busy
        ));

        f.session.busy.store(false, Ordering::SeqCst);
        f.session.advance().await.unwrap();
    }

    #[tokio::test]
    async fn resume_seeds_from_saved_checkpoint() {
        let company_id = CompanyId::new();
        let f = fixture_with_claims(AuthClaims {
            company_id: Some(company_id.clone()),
            ..AuthClaims::default()
        });
        let mut record = SetupRecord::default();
        record.business_name = "Bella Salon".to_string();
        f.progress
            .save(
                &company_id,
                &SetupProgress {
                    step: WizardStep::TeamSize,
                    record: record.clone(),
                    saved_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        let state = f.session.resume().await;
        assert_eq!(state.step, WizardStep::TeamSize);
        assert_eq!(state.record.business_name, "Bella Salon");

        // Seeding happens once; a second resume keeps current state.
        let again = f.session.resume().await;
        assert_eq!(again.step, WizardStep::TeamSize);
    }

    #[tokio::test]
    async fn resume_without_checkpoint_starts_fresh() {
        let f = fixture();
        let state = f.session.resume().await;
        assert_eq!(state.step, WizardStep::BusinessInfo);
        assert!(state.record.business_name.is_empty());
        assert_eq!(state.record.branches.len(), 1);
    }

    async fn seed_to_review(f: &Fixture) {
        let record = filled_record();
        f.session
            .apply(WizardEvent::SetBusinessInfo {
                business_name: record.business_name.clone(),
                business_type: record.business_type.clone(),
                main_services: record.main_services.clone(),
                owner_position: record.owner_position.clone(),
            })
            .await
            .unwrap();
        let state = f.session.state().await;
        let mut main = state.record.branches[0].clone();
        main.name = "Main".to_string();
        main.address = "123 St".to_string();
        main.phone = "0100000000".to_string();
        f.session
            .apply(WizardEvent::UpsertBranch { branch: main })
            .await
            .unwrap();
        f.session
            .apply(WizardEvent::SetEmployeeCount { count: 3 })
            .await
            .unwrap();
        f.session
            .apply(WizardEvent::SelectTheme {
                theme_id: "classic".to_string(),
            })
            .await
            .unwrap();
        for _ in 0..4 {
            f.session.advance().await.unwrap();
        }
        assert_eq!(f.session.state().await.step, WizardStep::Review);
    }
}
