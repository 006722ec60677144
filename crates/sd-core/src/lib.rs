//! # sd-core
//!
//! Core domain models and business logic for the SalonDesk onboarding flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod catalog;
pub mod company;
pub mod identity;
pub mod ids;
pub mod onboarding;
pub mod ports;

// Re-export commonly used types at the crate root
pub use catalog::{BusinessType, OwnerPosition, Theme};
pub use company::{Company, PrimaryLocation};
pub use identity::{AuthClaims, AuthUser};
pub use ids::{BranchId, CompanyId, UserId};
pub use onboarding::{Branch, SetupProgress, SetupRecord};
