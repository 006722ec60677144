//! Application use cases.

pub mod onboarding;
