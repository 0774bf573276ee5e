use thiserror::Error;

/// Boundary error for the telemetry adapter.
/// Hooks never surface these to the host; the callback layer maps each
/// variant to either a silent skip or a logged warning.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Required agent configuration is absent; emission is a silent no-op.
    #[error("agent configuration missing; telemetry disabled")]
    Disabled,

    /// Ambient trace/span ids unavailable; events for this call are dropped.
    #[error("trace context unavailable for current call")]
    TraceContextUnavailable,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TelemetryResult<T> = std::result::Result<T, TelemetryError>;
