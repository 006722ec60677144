//! Terminal setup transaction.
//!
//! The one state transition from "in progress" to "completed":
//! resolve or lazily create the owning company, write the final
//! record atomically, then refresh the caller's authorization context
//! so later permission checks see the new company association.

use std::sync::Arc;

use tracing::{info, warn};

use sd_core::catalog::{Theme, ThemeSnapshot};
use sd_core::company::{Company, PrimaryLocation};
use sd_core::ids::CompanyId;
use sd_core::onboarding::SetupRecord;
use sd_core::ports::{
    ClaimsServicePort, ClockPort, CompanyRepositoryError, CompanyRepositoryPort, IdentityPort,
    SessionFlagPort, SetupCommit, SetupProgressPort, SETUP_JUST_COMPLETED,
};

/// Role granted to the identity that completes setup.
pub const ADMIN_ROLE: &str = "admin";

/// Classified completion failures, each with a distinct user-facing
/// message. The wizard stays re-submittable after any of these.
#[derive(Debug, thiserror::Error)]
pub enum CompleteSetupError {
    #[error("company creation failed: {0}")]
    CompanyCreation(#[source] CompanyRepositoryError),
    #[error("permission denied")]
    Permission,
    #[error("network error: {0}")]
    Network(String),
    #[error("setup completion failed: {0}")]
    Unknown(#[from] anyhow::Error),
}

impl CompleteSetupError {
    /// Toast-style message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CompleteSetupError::CompanyCreation(_) => {
                "We couldn't create your company. Please try again."
            }
            CompleteSetupError::Permission => {
                "You don't have permission to complete setup."
            }
            CompleteSetupError::Network(_) => {
                "Connection problem. Check your network and try again."
            }
            CompleteSetupError::Unknown(_) => {
                "Something went wrong while completing setup. Please try again."
            }
        }
    }

    fn classify(error: CompanyRepositoryError) -> Self {
        match error {
            CompanyRepositoryError::PermissionDenied => CompleteSetupError::Permission,
            CompanyRepositoryError::Unavailable(message) => CompleteSetupError::Network(message),
            other => CompleteSetupError::Unknown(anyhow::Error::new(other)),
        }
    }
}

/// Use case for the terminal setup transaction.
pub struct CompleteSetup {
    identity: Arc<dyn IdentityPort>,
    companies: Arc<dyn CompanyRepositoryPort>,
    claims_service: Arc<dyn ClaimsServicePort>,
    progress: Arc<dyn SetupProgressPort>,
    session_flags: Arc<dyn SessionFlagPort>,
    clock: Arc<dyn ClockPort>,
}

impl CompleteSetup {
    pub fn new(
        identity: Arc<dyn IdentityPort>,
        companies: Arc<dyn CompanyRepositoryPort>,
        claims_service: Arc<dyn ClaimsServicePort>,
        progress: Arc<dyn SetupProgressPort>,
        session_flags: Arc<dyn SessionFlagPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            identity,
            companies,
            claims_service,
            progress,
            session_flags,
            clock,
        }
    }

    /// Run the terminal transaction. Retries re-resolve the company,
    /// so a company created by an earlier partial failure is reused
    /// rather than duplicated; there is no idempotency key beyond
    /// that re-resolution.
    pub async fn execute(&self, record: SetupRecord) -> Result<CompanyId, CompleteSetupError> {
        let user = self.identity.current_user().await?;

        // Resolve the owning company: claims, then repository lookup,
        // then lazy creation.
        let company = match self.resolve_company().await? {
            Some(company) => company,
            None => {
                let company =
                    Company::new_trial(CompanyId::new(), user.user_id.clone(), self.clock.now());
                self.companies
                    .create(company.clone())
                    .await
                    .map_err(CompleteSetupError::CompanyCreation)?;
                self.claims_service
                    .set_company_claims(&user.user_id, &company.id, ADMIN_ROLE)
                    .await?;
                info!(company_id = %company.id, "company created for setup");
                company
            }
        };

        // Unrecognized theme ids fall back to the default; a bad theme
        // id never fails completion.
        let theme = ThemeSnapshot::from(Theme::resolve_or_default(&record.theme_id));

        let commit = Self::build_commit(&company.id, &record, theme, self.clock.now());
        self.companies
            .commit_setup(commit)
            .await
            .map_err(CompleteSetupError::classify)?;

        self.claims_service
            .set_setup_completed(&user.user_id)
            .await?;

        // Claims propagation is asynchronous relative to the write
        // above; the explicit refresh closes that race.
        self.identity.refresh_claims().await?;

        // One-shot flag so the immediately following navigation does
        // not re-trigger the gate's full re-check.
        self.session_flags.set(SETUP_JUST_COMPLETED);

        if let Err(error) = self.progress.clear(&company.id).await {
            warn!(%error, "failed to clear setup checkpoint");
        }

        info!(company_id = %company.id, "setup completed");
        Ok(company.id)
    }

    async fn resolve_company(&self) -> Result<Option<Company>, CompleteSetupError> {
        let claims = self.identity.claims().await?;
        if let Some(id) = claims.company_id {
            if let Some(company) = self
                .companies
                .get(&id)
                .await
                .map_err(CompleteSetupError::classify)?
            {
                return Ok(Some(company));
            }
        }
        let user = self.identity.current_user().await?;
        self.companies
            .find_by_owner(&user.user_id)
            .await
            .map_err(CompleteSetupError::classify)
    }

    fn build_commit(
        company_id: &CompanyId,
        record: &SetupRecord,
        theme: ThemeSnapshot,
        completed_at: chrono::DateTime<chrono::Utc>,
    ) -> SetupCommit {
        // A single branch also gets a denormalized primary-location
        // document for faster lookups elsewhere.
        let primary_location = match record.branches.as_slice() {
            [only] => Some(PrimaryLocation {
                company_id: company_id.clone(),
                branch_id: only.id.clone(),
                name: only.name.clone(),
                address: only.address.clone(),
                phone: only.phone.clone(),
            }),
            _ => None,
        };
        SetupCommit {
            company_id: company_id.clone(),
            name: record.business_name.clone(),
            business_type: record.business_type.clone(),
            main_services: record.main_services.iter().cloned().collect(),
            owner_position: record.owner_position.clone(),
            employee_count: record.employee_count,
            theme,
            completed_at,
            branches: record.branches.clone(),
            primary_location,
        }
    }
}
