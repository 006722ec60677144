//! Wizard event port.
//!
//! Pushes wizard state snapshots and theme previews to the shell
//! layer. Emission is infallible from the domain's perspective.

use async_trait::async_trait;

use crate::catalog::ThemeSnapshot;
use crate::onboarding::WizardState;

#[async_trait]
pub trait WizardEventPort: Send + Sync {
    /// The wizard state changed; the shell should re-render.
    async fn state_changed(&self, state: &WizardState);

    /// A theme was selected; the shell should apply a live preview.
    async fn theme_preview(&self, theme: &ThemeSnapshot);
}
