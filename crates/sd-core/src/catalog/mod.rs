//! Fixed catalogs the onboarding wizard selects from.
//!
//! Business types (each with its sub-catalog of offered services),
//! owner positions and visual themes are compile-time data; the wizard
//! only ever stores identifiers drawn from these lists.

pub mod business_type;
pub mod owner_position;
pub mod theme;

pub use business_type::{BusinessType, Service, BUSINESS_TYPES};
pub use owner_position::{OwnerPosition, OWNER_POSITIONS};
pub use theme::{Theme, ThemeSnapshot, DEFAULT_THEME_ID, THEMES};
