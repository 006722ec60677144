//! Application dependency grouping.
//!
//! Not a builder: no build steps, no defaults, no hidden logic. Just a
//! struct grouping the port implementations the use cases are wired
//! with.

use std::sync::Arc;

use sd_core::ports::{
    ClaimsServicePort, ClockPort, CompanyRepositoryPort, IdentityPort, SessionFlagPort,
    SetupProgressPort, WizardEventPort,
};

/// All ports the onboarding use cases depend on. Every field is
/// required.
pub struct AppDeps {
    pub companies: Arc<dyn CompanyRepositoryPort>,
    pub progress: Arc<dyn SetupProgressPort>,
    pub identity: Arc<dyn IdentityPort>,
    pub claims_service: Arc<dyn ClaimsServicePort>,
    pub session_flags: Arc<dyn SessionFlagPort>,
    pub wizard_events: Arc<dyn WizardEventPort>,
    pub clock: Arc<dyn ClockPort>,
}
