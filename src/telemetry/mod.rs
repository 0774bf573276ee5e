//! Telemetry boundary between event construction and the APM agent.
//! The adapter only builds events; buffering, transport, and delivery belong
//! to the sink implementation.

pub mod build;
pub mod keys;
pub mod types;
#[cfg(test)]
pub mod capture;

pub use build::*;
pub use keys::*;
pub use types::*;

/// Implement this over the agent's custom-event and custom-metric APIs.
///
/// Requirements:
/// - Implementations must be thread-safe (`Send + Sync`) and `'static`.
/// - Methods may be called from any thread and should not panic.
/// - Keep overhead minimal; each method runs once per event on the call path.
pub trait TelemetrySink: Send + Sync + 'static {
    fn record_summary(&self, event: ChatCompletionSummary);

    fn record_message(&self, event: ChatCompletionMessage);

    /// Increment a named count metric (e.g. the error counter) by `count`.
    fn record_metric(&self, name: &str, count: u64);
}
