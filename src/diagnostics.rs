//! Sinks for non-fatal warnings raised while processing a query.

use std::sync::Mutex;

/// Receiver for non-fatal warnings, such as ignored filter phrases.
pub trait Diagnostics: Send + Sync {
    fn warning(&self, message: &str);
}

/// Forwards warnings to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Keeps every warning in memory.
#[derive(Debug, Default)]
pub struct Collector {
    messages: Mutex<Vec<String>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings received so far.
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Diagnostics for Collector {
    fn warning(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

impl<F> Diagnostics for F
where
    F: Fn(&str) + Send + Sync,
{
    fn warning(&self, message: &str) {
        self(message)
    }
}
