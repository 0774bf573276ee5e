use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ChatCall;

/// Header carrying W3C Trace Context:
/// `{version}-{trace-id}-{parent-id}-{flags}`, lowercase hex.
pub const TRACEPARENT_HEADER: &str = "traceparent";

static TRACEPARENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{2}-([0-9a-f]{32})-([0-9a-f]{16})-[0-9a-f]{2}$")
        .expect("traceparent pattern compiles")
});

/// Distributed-tracing correlation ids for the current call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
}

/// Read-only lookup of the ambient tracing context for a call.
///
/// Kept behind a trait so sequencing and redaction logic stay testable
/// without a live tracing backend.
pub trait TraceContextSource: Send + Sync {
    /// `None` means no usable trace/span pair is available; the caller must
    /// skip event emission for the call entirely. Telemetry without trace
    /// correlation is not worth sending.
    fn resolve(&self, call: &ChatCall) -> Option<TraceContext>;
}

/// Default source: the `traceparent` header propagated with the call.
///
/// The adapter runs downstream of the actual request, so it cannot ask the
/// agent for the live span; the propagated header is the call-scoped context.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderTraceContext;

impl TraceContextSource for HeaderTraceContext {
    fn resolve(&self, call: &ChatCall) -> Option<TraceContext> {
        let raw = call.propagation_headers.get(TRACEPARENT_HEADER)?;
        parse_traceparent(raw)
    }
}

/// Extract `(trace_id, span_id)` from a `traceparent` value.
/// All-zero trace or span ids are invalid per W3C and count as unavailable.
pub fn parse_traceparent(value: &str) -> Option<TraceContext> {
    let caps = TRACEPARENT.captures(value.trim())?;
    let trace_id = &caps[1];
    let span_id = &caps[2];
    if trace_id.bytes().all(|b| b == b'0') || span_id.bytes().all(|b| b == b'0') {
        return None;
    }
    Some(TraceContext {
        trace_id: trace_id.to_string(),
        span_id: span_id.to_string(),
    })
}
