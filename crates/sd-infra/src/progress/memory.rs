//! In-memory setup progress repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use sd_core::ids::CompanyId;
use sd_core::onboarding::SetupProgress;
use sd_core::ports::SetupProgressPort;

#[derive(Default)]
pub struct MemorySetupProgressRepository {
    entries: Mutex<HashMap<CompanyId, SetupProgress>>,
    fail: AtomicBool,
}

impl MemorySetupProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save/load/clear fail, for exercising the
    /// best-effort policy of callers.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().map(|e| e.is_empty()).unwrap_or(true)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("progress store offline");
        }
        Ok(())
    }
}

#[async_trait]
impl SetupProgressPort for MemorySetupProgressRepository {
    async fn save(&self, company_id: &CompanyId, progress: &SetupProgress) -> anyhow::Result<()> {
        self.check()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store poisoned"))?;
        entries.insert(company_id.clone(), progress.clone());
        Ok(())
    }

    async fn load(&self, company_id: &CompanyId) -> anyhow::Result<Option<SetupProgress>> {
        self.check()?;
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store poisoned"))?;
        Ok(entries.get(company_id).cloned())
    }

    async fn clear(&self, company_id: &CompanyId) -> anyhow::Result<()> {
        self.check()?;
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("progress store poisoned"))?;
        entries.remove(company_id);
        Ok(())
    }
}
