//! Wizard event adapter that records facts to the log.
//!
//! Used where no shell is attached (headless runs, tests that only
//! care about side effects elsewhere).

use async_trait::async_trait;
use tracing::debug;

use sd_core::catalog::ThemeSnapshot;
use sd_core::onboarding::WizardState;
use sd_core::ports::WizardEventPort;

#[derive(Default)]
pub struct TracingWizardEvents;

#[async_trait]
impl WizardEventPort for TracingWizardEvents {
    async fn state_changed(&self, state: &WizardState) {
        debug!(step = ?state.step, errors = state.errors.len(), "wizard state changed");
    }

    async fn theme_preview(&self, theme: &ThemeSnapshot) {
        debug!(theme = %theme.id, "theme preview");
    }
}
