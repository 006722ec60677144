//! Onboarding use cases.
//!
//! The wizard session drives the pure state machine and executes its
//! side-effect actions; the persister checkpoints progress
//! best-effort; the completer runs the terminal transaction; the gate
//! guards protected routes.

pub mod complete_setup;
pub mod persist_progress;
pub mod setup_gate;
pub mod wizard_session;

pub use complete_setup::{CompleteSetup, CompleteSetupError};
pub use persist_progress::PersistProgress;
pub use setup_gate::{GateDecision, SetupGate};
pub use wizard_session::{WizardSession, WizardSessionError};
