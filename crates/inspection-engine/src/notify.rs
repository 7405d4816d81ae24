//! Diagnostic delivery for callers that surface problems to users.

use crate::error::EngineError;
use std::sync::Mutex;

/// Receives diagnostics produced during an evaluation pass
pub trait Notifier: Send + Sync {
    fn notify(&self, diagnostic: &EngineError);
}

/// Writes diagnostics to the `tracing` log at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, diagnostic: &EngineError) {
        tracing::warn!(
            question_id = ?diagnostic.question_id(),
            "checklist diagnostic: {}",
            diagnostic
        );
    }
}

/// Keeps rendered diagnostics in memory for later display
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, diagnostic: &EngineError) {
        let mut messages = self
            .messages
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        messages.push(diagnostic.to_string());
    }
}
