//! In-memory identity provider and claims service.
//!
//! Models the asynchronous claims-propagation behavior of a real
//! identity backend: updates land in a pending slot and only become
//! visible through `claims()` after an explicit `refresh_claims()`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sd_core::identity::{AuthClaims, AuthUser};
use sd_core::ids::{CompanyId, UserId};
use sd_core::ports::{ClaimsServicePort, IdentityPort};

struct IdentityInner {
    user: AuthUser,
    current: AuthClaims,
    pending: Option<AuthClaims>,
}

/// Identity provider backed by process memory.
pub struct MemoryIdentityProvider {
    inner: Arc<Mutex<IdentityInner>>,
}

impl MemoryIdentityProvider {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(IdentityInner {
                user: AuthUser {
                    user_id: user_id.into(),
                },
                current: AuthClaims::default(),
                pending: None,
            })),
        }
    }

    /// Start with the given claims already on the token.
    pub fn with_claims(self, claims: AuthClaims) -> Self {
        self.inner.lock().expect("identity poisoned").current = claims;
        self
    }

    /// The claims-update backend sharing this provider's state.
    pub fn claims_service(&self) -> Arc<MemoryClaimsService> {
        Arc::new(MemoryClaimsService {
            inner: Arc::clone(&self.inner),
        })
    }
}

#[async_trait]
impl IdentityPort for MemoryIdentityProvider {
    async fn current_user(&self) -> anyhow::Result<AuthUser> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("identity state poisoned"))?;
        Ok(inner.user.clone())
    }

    async fn claims(&self) -> anyhow::Result<AuthClaims> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("identity state poisoned"))?;
        Ok(inner.current.clone())
    }

    async fn refresh_claims(&self) -> anyhow::Result<AuthClaims> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("identity state poisoned"))?;
        if let Some(pending) = inner.pending.take() {
            inner.current = pending;
        }
        Ok(inner.current.clone())
    }
}

/// Claims-update backend paired with [`MemoryIdentityProvider`].
pub struct MemoryClaimsService {
    inner: Arc<Mutex<IdentityInner>>,
}

impl MemoryClaimsService {
    /// Stage a claims mutation without making it visible yet.
    fn stage(&self, mutate: impl FnOnce(&mut AuthClaims)) -> anyhow::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("identity state poisoned"))?;
        let mut staged = inner
            .pending
            .take()
            .unwrap_or_else(|| inner.current.clone());
        mutate(&mut staged);
        inner.pending = Some(staged);
        Ok(())
    }
}

#[async_trait]
impl ClaimsServicePort for MemoryClaimsService {
    async fn set_company_claims(
        &self,
        _user_id: &UserId,
        company_id: &CompanyId,
        role: &str,
    ) -> anyhow::Result<()> {
        let company_id = company_id.clone();
        let role = role.to_string();
        self.stage(move |claims| {
            claims.company_id = Some(company_id);
            claims.role = Some(role);
        })
    }

    async fn set_setup_completed(&self, _user_id: &UserId) -> anyhow::Result<()> {
        self.stage(|claims| claims.setup_completed = true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn claims_updates_are_invisible_until_refresh() {
        let identity = MemoryIdentityProvider::new("user-1");
        let service = identity.claims_service();
        let company_id = CompanyId::new();

        service
            .set_company_claims(&UserId::from("user-1"), &company_id, "admin")
            .await
            .unwrap();

        // Not yet propagated.
        assert!(identity.claims().await.unwrap().company_id.is_none());

        let refreshed = identity.refresh_claims().await.unwrap();
        assert_eq!(refreshed.company_id, Some(company_id));
        assert_eq!(refreshed.role.as_deref(), Some("admin"));
        assert!(identity.claims().await.unwrap().company_id.is_some());
    }

    #[tokio::test]
    async fn staged_updates_accumulate_before_refresh() {
        let identity = MemoryIdentityProvider::new("user-1");
        let service = identity.claims_service();
        let company_id = CompanyId::new();
        let user = UserId::from("user-1");

        service
            .set_company_claims(&user, &company_id, "admin")
            .await
            .unwrap();
        service.set_setup_completed(&user).await.unwrap();

        let refreshed = identity.refresh_claims().await.unwrap();
        assert_eq!(refreshed.company_id, Some(company_id));
        assert!(refreshed.setup_completed);
    }

    #[tokio::test]
    async fn refresh_without_pending_is_a_no_op() {
        let identity = MemoryIdentityProvider::new("user-1").with_claims(AuthClaims {
            role: Some("admin".to_string()),
            ..AuthClaims::default()
        });
        let refreshed = identity.refresh_claims().await.unwrap();
        assert_eq!(refreshed.role.as_deref(), Some("admin"));
    }
}
