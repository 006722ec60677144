//! File-based setup progress repository.
//!
//! Persists each company's checkpoint as a JSON document under a base
//! directory. Saves fully overwrite the stored document.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use sd_core::ids::CompanyId;
use sd_core::onboarding::SetupProgress;
use sd_core::ports::SetupProgressPort;

pub const DEFAULT_PROGRESS_DIR: &str = "salondesk/setup_progress";

pub struct FileSetupProgressRepository {
    base_dir: PathBuf,
}

impl FileSetupProgressRepository {
    /// Create repository with a custom base directory.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Create repository under the platform-local data directory.
    pub fn with_default_base() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join(DEFAULT_PROGRESS_DIR)))
    }

    fn progress_file_path(&self, company_id: &CompanyId) -> PathBuf {
        self.base_dir.join(format!("{company_id}.json"))
    }

    async fn ensure_base_dir(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.base_dir).await?;
        Ok(())
    }
}

#[async_trait]
impl SetupProgressPort for FileSetupProgressRepository {
    async fn save(&self, company_id: &CompanyId, progress: &SetupProgress) -> anyhow::Result<()> {
        self.ensure_base_dir().await?;

        let json = serde_json::to_string_pretty(progress)
            .map_err(|e| anyhow::anyhow!("Failed to serialize setup progress: {e}"))?;

        let path = self.progress_file_path(company_id);
        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create progress file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write progress file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync progress file: {e}"))?;

        Ok(())
    }

    async fn load(&self, company_id: &CompanyId) -> anyhow::Result<Option<SetupProgress>> {
        let path = self.progress_file_path(company_id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let progress: SetupProgress = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse setup progress: {e}"))?;

        Ok(Some(progress))
    }

    async fn clear(&self, company_id: &CompanyId) -> anyhow::Result<()> {
        let path = self.progress_file_path(company_id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        Ok(())
    }
}
