//! Claims-update backend port.
//!
//! An authenticated remote call that sets custom attributes on an
//! identity. Idempotent from this flow's perspective; the updated
//! claims only become visible to the caller after a token refresh.

use async_trait::async_trait;

use crate::ids::{CompanyId, UserId};

#[async_trait]
pub trait ClaimsServicePort: Send + Sync {
    /// Attach `company_id` and `role` to the identity's token claims.
    async fn set_company_claims(
        &self,
        user_id: &UserId,
        company_id: &CompanyId,
        role: &str,
    ) -> anyhow::Result<()>;

    /// Mark the identity's company as set up.
    async fn set_setup_completed(&self, user_id: &UserId) -> anyhow::Result<()>;
}
