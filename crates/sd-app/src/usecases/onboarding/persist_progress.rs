//! Best-effort progress checkpointing.
//!
//! Losing a checkpoint must never interrupt the onboarding flow: the
//! fire-and-forget entry point spawns the save and downgrades every
//! failure to a log line. One attempt per invocation, no retry, no
//! queueing.

use std::sync::Arc;

use tracing::{debug, warn};

use sd_core::ids::CompanyId;
use sd_core::onboarding::{SetupProgress, SetupRecord, WizardStep};
use sd_core::ports::{ClockPort, CompanyRepositoryPort, IdentityPort, SetupProgressPort};

/// Use case for checkpointing in-progress wizard state, keyed by
/// company.
pub struct PersistProgress {
    identity: Arc<dyn IdentityPort>,
    companies: Arc<dyn CompanyRepositoryPort>,
    progress: Arc<dyn SetupProgressPort>,
    clock: Arc<dyn ClockPort>,
}

impl PersistProgress {
    pub fn new(
        identity: Arc<dyn IdentityPort>,
        companies: Arc<dyn CompanyRepositoryPort>,
        progress: Arc<dyn SetupProgressPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            identity,
            companies,
            progress,
            clock,
        }
    }

    /// Save a checkpoint. Overwrites any earlier checkpoint for the
    /// same company (last-write-wins).
    pub async fn execute(&self, step: WizardStep, record: SetupRecord) -> anyhow::Result<()> {
        let Some(company_id) = self.resolve_company_id().await? else {
            // No company exists yet (it is created lazily at
            // completion), so there is nothing to key the checkpoint by.
            debug!("no company associated yet, checkpoint skipped");
            return Ok(());
        };
        let snapshot = SetupProgress {
            step,
            record,
            saved_at: self.clock.now(),
        };
        self.progress.save(&company_id, &snapshot).await?;
        debug!(company_id = %company_id, step = ?step, "progress checkpoint saved");
        Ok(())
    }

    /// Spawn `execute` without awaiting it. Failures are logged and
    /// swallowed; the caller's navigation is never blocked.
    pub fn fire_and_forget(self: &Arc<Self>, step: WizardStep, record: SetupRecord) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(error) = this.execute(step, record).await {
                warn!(%error, "progress checkpoint failed");
            }
        });
    }

    /// Company id from token claims, falling back to a repository
    /// lookup when claims are stale or absent.
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
