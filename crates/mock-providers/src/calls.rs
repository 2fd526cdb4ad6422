//! Shared call log for stub providers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::Value;

/// A recorded collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Collaborator name.
    pub provider: &'static str,
    /// The query it received, as JSON.
    pub query: Value,
}

/// Records which collaborators were called, in order, and with what.
///
/// Clones share the same log, so a test can keep one handle while the
/// providers move into a registry.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call to the named collaborator.
    pub fn record<Q: Serialize>(&self, provider: &'static str, query: &Q) {
        let query = serde_json::to_value(query).unwrap_or(Value::Null);
        self.lock().push(RecordedCall { provider, query });
    }

    /// Total number of calls to any collaborator.
    pub fn total(&self) -> usize {
        self.lock().len()
    }

    /// Number of calls to one collaborator.
    pub fn count(&self, provider: &str) -> usize {
        self.lock().iter().filter(|c| c.provider == provider).count()
    }

    /// Collaborator names in call order.
    pub fn sequence(&self) -> Vec<&'static str> {
        self.lock().iter().map(|c| c.provider).collect()
    }

    /// The query most recently sent to a collaborator.
    pub fn last_query(&self, provider: &str) -> Option<Value> {
        self.lock()
            .iter()
            .rev()
            .find(|c| c.provider == provider)
            .map(|c| c.query.clone())
    }
}
