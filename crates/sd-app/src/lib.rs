//! SalonDesk application orchestration layer.
//!
//! This crate contains the onboarding use cases and the wizard session
//! that drives the pure state machine from `sd-core`.

pub mod deps;
pub mod usecases;

pub use deps::AppDeps;
pub use usecases::onboarding::{
    CompleteSetup, CompleteSetupError, GateDecision, PersistProgress, SetupGate, WizardSession,
    WizardSessionError,
};
