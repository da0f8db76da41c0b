use parking_lot::Mutex;
use std::sync::Arc;

/// Lifecycle hook observed on a test category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Constructed,
    Registered,
    Resolved,
    Translated,
    Destroyed,
}

/// Shared record of lifecycle hooks, cloned into every test category.
#[derive(Debug, Clone, Default)]
pub struct LifecycleLog {
    events: Arc<Mutex<Vec<(String, Hook)>>>,
}

impl LifecycleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str, hook: Hook) {
        self.events.lock().push((name.to_string(), hook));
    }

    /// Number of times `hook` fired for `name`.
    pub fn count(&self, name: &str, hook: Hook) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|(event_name, event_hook)| event_name == name && *event_hook == hook)
            .count()
    }

    /// Number of times `hook` fired across all categories.
    pub fn total(&self, hook: Hook) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|(_, event_hook)| *event_hook == hook)
            .count()
    }

    pub fn events(&self) -> Vec<(String, Hook)> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
