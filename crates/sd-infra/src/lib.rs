//! Infrastructure adapters for the SalonDesk onboarding flow.
//!
//! In-memory adapters back unit and integration tests; the file-based
//! checkpoint repository persists progress as local JSON documents. In
//! production the repository ports are implemented against the managed
//! document store instead.

pub mod company;
pub mod events;
pub mod identity;
pub mod progress;
pub mod session;
pub mod time;

pub use company::MemoryCompanyRepository;
pub use events::TracingWizardEvents;
pub use identity::{MemoryClaimsService, MemoryIdentityProvider};
pub use progress::{FileSetupProgressRepository, MemorySetupProgressRepository};
pub use session::MemorySessionFlags;
pub use time::{FixedClock, SystemClock};
