//! The setup record under construction during onboarding.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::company::TRIAL_MAX_BRANCHES;
use crate::ids::BranchId;

/// A physical business location being entered in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Exactly one branch carries this flag; it cannot be removed.
    pub is_main: bool,
}

impl Branch {
    /// A blank branch ready for user input.
    pub fn blank() -> Self {
        Self {
            id: BranchId::new(),
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            is_main: false,
        }
    }
}

/// Accumulated wizard values. Created with defaults when a user with
/// no associated company enters the wizard, mutated step by step, and
/// finalized exactly once by the setup completer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupRecord {
    pub business_name: String,
    pub business_type: String,
    pub main_services: BTreeSet<String>,
    pub owner_position: String,
    pub branches: Vec<Branch>,
    pub employee_count: u32,
    pub theme_id: String,
}

impl Default for SetupRecord {
    fn default() -> Self {
        let mut main = Branch::blank();
        main.is_main = true;
        Self {
            business_name: String::new(),
            business_type: String::new(),
            main_services: BTreeSet::new(),
            owner_position: String::new(),
            branches: vec![main],
            employee_count: 1,
            theme_id: String::new(),
        }
    }
}

impl SetupRecord {
    /// Add a branch. No-op once the trial-tier limit is reached; a
    /// second main branch is demoted since exactly one main exists.
    pub fn add_branch(&mut self, mut branch: Branch) -> bool {
        if self.branches.len() >= TRIAL_MAX_BRANCHES {
            #[cfg(feature = "tracing")]
            tracing::debug!(limit = TRIAL_MAX_BRANCHES, "branch limit reached, add ignored");
            return false;
        }
        if branch.is_main && self.branches.iter().any(|b| b.is_main) {
            branch.is_main = false;
        }
        self.branches.push(branch);
        true
    }

    /// Update an existing branch's editable fields. The main flag of
    /// the stored branch is preserved.
    pub fn update_branch(&mut self, branch: Branch) -> bool {
        match self.branches.iter_mut().find(|b| b.id == branch.id) {
            Some(existing) => {
                existing.name = branch.name;
                existing.address = branch.address;
                existing.phone = branch.phone;
                true
            }
            None => false,
        }
    }

    /// Remove a branch by id. The main branch cannot be removed;
    /// removing an unknown id is a no-op.
    pub fn remove_branch(&mut self, id: &BranchId) -> bool {
        match self.branches.iter().position(|b| &b.id == id) {
            Some(index) if self.branches[index].is_main => {
                #[cfg(feature = "tracing")]
                tracing::debug!(branch_id = %id, "refusing to remove main branch");
                false
            }
            Some(index) => {
                self.branches.remove(index);
                true
            }
            None => false,
        }
    }

    /// The branch flagged as main.
    pub fn main_branch(&self) -> Option<&Branch> {
        self.branches.iter().find(|b| b.is_main)
    }
}
