//! In-memory session flag store.
//!
//! Stands in for the client-local ephemeral storage that holds
//! one-shot flags for the lifetime of a session.

use std::collections::BTreeSet;
use std::sync::Mutex;

use sd_core::ports::SessionFlagPort;

#[derive(Default)]
pub struct MemorySessionFlags {
    flags: Mutex<BTreeSet<String>>,
}

impl MemorySessionFlags {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionFlagPort for MemorySessionFlags {
    fn set(&self, key: &str) {
        if let Ok(mut flags) = self.flags.lock() {
            flags.insert(key.to_string());
        }
    }

    fn take(&self, key: &str) -> bool {
        match self.flags.lock() {
            Ok(mut flags) => flags.remove(key),
            Err(_) => false,
        }
    }
}
