//! Company repository port.
//!
//! Backed in production by a managed document store; the terminal
//! setup write must be applied as one atomic multi-document
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ThemeSnapshot;
use crate::company::{Company, PrimaryLocation};
use crate::ids::{CompanyId, UserId};
use crate::onboarding::Branch;
use crate::ports::errors::CompanyRepositoryError;

/// The terminal setup write: company profile fields, one document per
/// branch, and the optional denormalized primary location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupCommit {
    pub company_id: CompanyId,
    pub name: String,
    pub business_type: String,
    pub main_services: Vec<String>,
    pub owner_position: String,
    pub employee_count: u32,
    pub theme: ThemeSnapshot,
    pub completed_at: DateTime<Utc>,
    pub branches: Vec<Branch>,
    /// Written iff the company has exactly one branch.
    pub primary_location: Option<PrimaryLocation>,
}

#[async_trait]
pub trait CompanyRepositoryPort: Send + Sync {
    /// Look up the company owned by `owner`, if any.
    async fn find_by_owner(&self, owner: &UserId)
        -> Result<Option<Company>, CompanyRepositoryError>;

    /// Fetch a company by id.
    async fn get(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError>;

    /// Create a new company record. Not idempotent; fails with
    /// [`CompanyRepositoryError::AlreadyExists`] when the owner
    /// already has one.
    async fn create(&self, company: Company) -> Result<(), CompanyRepositoryError>;

    /// Apply the terminal setup write atomically: either every
    /// document in the commit lands, or none do.
    async fn commit_setup(&self, commit: SetupCommit) -> Result<(), CompanyRepositoryError>;
}
