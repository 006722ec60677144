//! Progress checkpoint persisted between sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::onboarding::record::SetupRecord;
use crate::onboarding::wizard::WizardStep;

/// Snapshot of in-progress wizard state, keyed by company in the
/// backing store. Later saves fully overwrite earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetupProgress {
    pub step: WizardStep,
    pub record: SetupRecord,
    pub saved_at: DateTime<Utc>,
}
