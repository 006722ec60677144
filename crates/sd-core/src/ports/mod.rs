//! Port interfaces for the application layer.
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal
//! Architecture principles, allowing the core business logic to remain
//! independent of external dependencies.

pub mod claims_service;
mod clock;
pub mod company_repository;
pub mod errors;
pub mod identity;
pub mod session_flag;
pub mod setup_progress;
pub mod wizard_event;

pub use claims_service::ClaimsServicePort;
pub use clock::ClockPort;
pub use company_repository::{CompanyRepositoryPort, SetupCommit};
pub use errors::CompanyRepositoryError;
pub use identity::IdentityPort;
pub use session_flag::{SessionFlagPort, SETUP_JUST_COMPLETED};
pub use setup_progress::SetupProgressPort;
pub use wizard_event::WizardEventPort;
