//! Diagnostic sinks for detected corruption.
//!
//! The codec never logs on its own; callers hand it a sink. Sinks must be
//! shareable across threads since one link may be verified from several.

/// Receives one human-readable message per detected corruption.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, message: &str);
}

/// Forwards diagnostics to `tracing` at `warn` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, message: &str) {
        tracing::warn!(target: "motionlink::packet", "{message}");
    }
}

/// Discards diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _message: &str) {}
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, message: &str) {
        self(message)
    }
}
