//! In-memory company repository.
//!
//! Companies, branch collections and denormalized primary locations
//! live behind a single lock, so `commit_setup` applies its writes
//! under one write guard and is atomic from any reader's perspective.
//! Failure injection hooks let tests exercise each error class of the
//! terminal transaction.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use sd_core::company::{Company, PrimaryLocation};
use sd_core::ids::{CompanyId, UserId};
use sd_core::onboarding::Branch;
use sd_core::ports::{CompanyRepositoryError, CompanyRepositoryPort, SetupCommit};

#[derive(Default)]
struct CompanyStore {
    companies: HashMap<CompanyId, Company>,
    branches: HashMap<CompanyId, Vec<Branch>>,
    primary_locations: HashMap<CompanyId, PrimaryLocation>,
}

#[derive(Default)]
pub struct MemoryCompanyRepository {
    store: RwLock<CompanyStore>,
    fail_on_create: Mutex<Option<CompanyRepositoryError>>,
    fail_on_commit: Mutex<Option<CompanyRepositoryError>>,
}

impl MemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a company directly, bypassing the port.
    pub fn insert(&self, company: Company) {
        let mut store = self.store.write().expect("company store poisoned");
        store.companies.insert(company.id.clone(), company);
    }

    /// Branch documents stored for a company.
    pub fn branches(&self, company_id: &CompanyId) -> Vec<Branch> {
        let store = self.store.read().expect("company store poisoned");
        store.branches.get(company_id).cloned().unwrap_or_default()
    }

    /// The denormalized primary-location document, if written.
    pub fn primary_location(&self, company_id: &CompanyId) -> Option<PrimaryLocation> {
        let store = self.store.read().expect("company store poisoned");
        store.primary_locations.get(company_id).cloned()
    }

    pub fn company_count(&self) -> usize {
        let store = self.store.read().expect("company store poisoned");
        store.companies.len()
    }

    /// Fail the next `create` call with `error`.
    pub fn fail_on_create(&self, error: CompanyRepositoryError) {
        *self.fail_on_create.lock().expect("injector poisoned") = Some(error);
    }

    /// Fail the next `commit_setup` call with `error`.
    pub fn fail_on_commit(&self, error: CompanyRepositoryError) {
        *self.fail_on_commit.lock().expect("injector poisoned") = Some(error);
    }
}

#[async_trait]
impl CompanyRepositoryPort for MemoryCompanyRepository {
    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<Company>, CompanyRepositoryError> {
        let store = self
            .store
            .read()
            .map_err(|_| CompanyRepositoryError::Storage("store poisoned".to_string()))?;
        Ok(store
            .companies
            .values()
            .find(|company| &company.owner_id == owner)
            .cloned())
    }

    async fn get(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        let store = self
            .store
            .read()
            .map_err(|_| CompanyRepositoryError::Storage("store poisoned".to_string()))?;
        Ok(store.companies.get(id).cloned())
    }

    async fn create(&self, company: Company) -> Result<(), CompanyRepositoryError> {
        if let Some(error) = self.fail_on_create.lock().ok().and_then(|mut e| e.take()) {
            return Err(error);
        }
        let mut store = self
            .store
            .write()
            .map_err(|_| CompanyRepositoryError::Storage("store poisoned".to_string()))?;
        if store
            .companies
            .values()
            .any(|existing| existing.owner_id == company.owner_id)
        {
            return Err(CompanyRepositoryError::AlreadyExists);
        }
        store.companies.insert(company.id.clone(), company);
        Ok(())
    }

    async fn commit_setup(&self, commit: SetupCommit) -> Result<(), CompanyRepositoryError> {
        if let Some(error) = self.fail_on_commit.lock().ok().and_then(|mut e| e.take()) {
            return Err(error);
        }
        let mut store = self
            .store
            .write()
            .map_err(|_| CompanyRepositoryError::Storage("store poisoned".to_string()))?;
        let company = store.companies.get_mut(&commit.company_id).ok_or_else(|| {
            CompanyRepositoryError::Storage("company document missing".to_string())
        })?;

        company.name = commit.name;
        company.business_type = commit.business_type;
        company.main_services = commit.main_services;
        company.owner_position = commit.owner_position;
        company.employee_count = commit.employee_count;
        company.theme = Some(commit.theme);
        company.setup_completed = true;
        company.setup_completed_at = Some(commit.completed_at);

        store
            .branches
            .insert(commit.company_id.clone(), commit.branches);
        match commit.primary_location {
            Some(location) => {
                store
                    .primary_locations
                    .insert(commit.company_id.clone(), location);
            }
            None => {
                store.primary_locations.remove(&commit.company_id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sd_core::catalog::{Theme, ThemeSnapshot};

    fn trial_company(owner: &str) -> Company {
        Company::new_trial(CompanyId::new(), UserId::from(owner), Utc::now())
    }

    fn commit_for(company_id: &CompanyId) -> SetupCommit {
        let branch = Branch {
            name: "Main".to_string(),
            address: "123 St".to_string(),
            phone: "0100000000".to_string(),
            is_main: true,
            ..Branch::blank()
        };
        SetupCommit {
            company_id: company_id.clone(),
            name: "Bella Salon".to_string(),
            business_type: "barbershop".to_string(),
            main_services: vec!["haircut".to_string()],
            owner_position: "owner".to_string(),
            employee_count: 3,
            theme: ThemeSnapshot::from(Theme::resolve_or_default("classic")),
            completed_at: Utc::now(),
            branches: vec![branch.clone()],
            primary_location: Some(PrimaryLocation {
                company_id: company_id.clone(),
                branch_id: branch.id,
                name: branch.name,
                address: branch.address,
                phone: branch.phone,
            }),
        }
    }

    #[tokio::test]
    async fn create_rejects_second_company_for_same_owner() {
        let repo = MemoryCompanyRepository::new();
        repo.create(trial_company("user-1")).await.unwrap();
        let error = repo.create(trial_company("user-1")).await.unwrap_err();
        assert!(matches!(error, CompanyRepositoryError::AlreadyExists));
    }

    #[tokio::test]
    async fn commit_setup_writes_profile_branches_and_primary_location() {
        let repo = MemoryCompanyRepository::new();
        let company = trial_company("user-1");
        let id = company.id.clone();
        repo.create(company).await.unwrap();

        repo.commit_setup(commit_for(&id)).await.unwrap();

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert!(stored.setup_completed);
        assert_eq!(stored.name, "Bella Salon");
        assert_eq!(repo.branches(&id).len(), 1);
        assert!(repo.primary_location(&id).is_some());
    }

    #[tokio::test]
    async fn failed_commit_leaves_no_partial_writes() {
        let repo = MemoryCompanyRepository::new();
        let company = trial_company("user-1");
        let id = company.id.clone();
        repo.create(company).await.unwrap();

        repo.fail_on_commit(CompanyRepositoryError::Unavailable("offline".to_string()));
        repo.commit_setup(commit_for(&id)).await.unwrap_err();

        let stored = repo.get(&id).await.unwrap().unwrap();
        assert!(!stored.setup_completed);
        assert!(repo.branches(&id).is_empty());
        assert!(repo.primary_location(&id).is_none());
    }

    #[tokio::test]
    async fn commit_with_two_branches_clears_primary_location() {
        let repo = MemoryCompanyRepository::new();
        let company = trial_company("user-1");
        let id = company.id.clone();
        repo.create(company).await.unwrap();
        repo.commit_setup(commit_for(&id)).await.unwrap();
        assert!(repo.primary_location(&id).is_some());

        let mut commit = commit_for(&id);
        commit.branches.push(Branch {
            name: "Downtown".to_string(),
            address: "45 Side St".to_string(),
            phone: "0100000001".to_string(),
            ..Branch::blank()
        });
        commit.primary_location = None;
        repo.commit_setup(commit).await.unwrap();
        assert!(repo.primary_location(&id).is_none());
        assert_eq!(repo.branches(&id).len(), 2);
    }
}
