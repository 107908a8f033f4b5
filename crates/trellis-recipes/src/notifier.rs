//! Request-scoped notifier

use crate::services::Notifier;
use std::sync::Mutex;
use trellis_types::{NotifyEntry, NotifyLevel};

/// Collects notifications raised while handling one request
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    entries: Mutex<Vec<NotifyEntry>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected entries
    pub fn entries(&self) -> Vec<NotifyEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Remove and return the collected entries
    pub fn take(&self) -> Vec<NotifyEntry> {
        std::mem::take(
            &mut *self
                .entries
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl Notifier for InMemoryNotifier {
    fn add(&self, level: NotifyLevel, message: String) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(NotifyEntry::new(level, message));
    }
}
