//! Session-scoped ephemeral flag port.
//!
//! A same-session key/value store, cleared when the session ends. Used
//! solely for one-shot flags consumed exactly once.

/// Flag set by the setup completer so the immediately following
/// navigation skips the gate's full re-check.
pub const SETUP_JUST_COMPLETED: &str = "setup_just_completed";

pub trait SessionFlagPort: Send + Sync {
    /// Set a flag.
    fn set(&self, key: &str);

    /// Consume a flag: returns whether it was set, and clears it.
    fn take(&self, key: &str) -> bool;
}
