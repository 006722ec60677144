//! Identity provider port.

use async_trait::async_trait;

use crate::identity::{AuthClaims, AuthUser};

#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// The currently authenticated user.
    async fn current_user(&self) -> anyhow::Result<AuthUser>;

    /// Claims carried by the current token. May lag behind backend
    /// claim updates until [`IdentityPort::refresh_claims`] is called.
    async fn claims(&self) -> anyhow::Result<AuthClaims>;

    /// Force a token refresh and return the refreshed claims. Exists
    /// to close the race between a backend claims update and the next
    /// authorization check.
    async fn refresh_claims(&self) -> anyhow::Result<AuthClaims>;
}
