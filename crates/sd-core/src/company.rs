//! Company (tenant) entity and its denormalized primary location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ThemeSnapshot;
use crate::ids::{BranchId, CompanyId, UserId};

/// Tier assigned to companies created through the onboarding flow.
pub const TRIAL_TIER: &str = "trial";

/// Branch limit for the trial tier.
pub const TRIAL_MAX_BRANCHES: usize = 2;

/// The tenant entity. Created lazily during setup completion, profile
/// fields are filled in by the terminal setup transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    /// The identity that owns this company (its administrator).
    pub owner_id: UserId,
    pub tier: String,
    pub max_branches: usize,
    pub name: String,
    pub business_type: String,
    pub main_services: Vec<String>,
    pub owner_position: String,
    pub employee_count: u32,
    pub theme: Option<ThemeSnapshot>,
    pub setup_completed: bool,
    pub setup_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// A freshly created company, before the setup transaction fills
    /// in its profile.
    pub fn new_trial(id: CompanyId, owner_id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id,
            tier: TRIAL_TIER.to_string(),
            max_branches: TRIAL_MAX_BRANCHES,
            name: String::new(),
            business_type: String::new(),
            main_services: Vec::new(),
            owner_position: String::new(),
            employee_count: 0,
            theme: None,
            setup_completed: false,
            setup_completed_at: None,
            created_at,
        }
    }
}

/// Denormalized single-location record, written when a company has
/// exactly one branch so that common lookups skip the branch collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryLocation {
    pub company_id: CompanyId,
    pub branch_id: BranchId,
    pub name: String,
    pub address: String,
    pub phone: String,
}
