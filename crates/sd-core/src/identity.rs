//! Identity and token-claims models.
//!
//! Claims are attributes attached to an authenticated identity's token
//! and consulted for authorization decisions. They are written by the
//! claims backend and only become visible to this process after a
//! token refresh.

use serde::{Deserialize, Serialize};

use crate::ids::{CompanyId, UserId};

/// The currently authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// Custom claims carried by the identity token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Company the identity belongs to, absent until setup associates one.
    pub company_id: Option<CompanyId>,
    /// Role within the company (e.g. "admin").
    pub role: Option<String>,
    /// Whether the identity's company has completed setup.
    pub setup_completed: bool,
}

impl AuthClaims {
    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }
}
