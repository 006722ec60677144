//! Onboarding domain module.
//!
//! The setup record under construction, the wizard state machine that
//! drives the five-step flow, the per-step validator gating forward
//! navigation, and the progress checkpoint snapshot.

pub mod progress;
pub mod record;
pub mod validation;
pub mod wizard;

pub use progress::SetupProgress;
pub use record::{Branch, SetupRecord};
pub use validation::{StepValidation, StepValidator};
pub use wizard::{WizardAction, WizardEvent, WizardState, WizardStateMachine, WizardStep};
