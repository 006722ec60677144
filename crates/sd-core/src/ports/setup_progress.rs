//! Setup progress port.
//!
//! Best-effort checkpoint store for in-progress wizard state, keyed by
//! company. Saves fully overwrite the stored document (last-write-wins).

use async_trait::async_trait;

use crate::ids::CompanyId;
use crate::onboarding::SetupProgress;

#[async_trait]
pub trait SetupProgressPort: Send + Sync {
    /// Overwrite the stored checkpoint for `company_id`.
    async fn save(&self, company_id: &CompanyId, progress: &SetupProgress) -> anyhow::Result<()>;

    /// Load the stored checkpoint, if any.
    async fn load(&self, company_id: &CompanyId) -> anyhow::Result<Option<SetupProgress>>;

    /// Drop the stored checkpoint.
    async fn clear(&self, company_id: &CompanyId) -> anyhow::Result<()>;
}
