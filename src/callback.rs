use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AgentSettings, NewRelicParams};
use crate::error::{TelemetryError, TelemetryResult};
use crate::identity;
use crate::model::{CallTiming, ChatCall, ChatResponse};
use crate::sequence;
use crate::telemetry::{self, TelemetrySink};
use crate::trace::{HeaderTraceContext, TraceContextSource};

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// The host's callback surface: six lifecycle hooks per chat-completion
/// call.
///
/// Contract:
/// - `on_pre_call` / `on_post_call` are contractual no-ops and must return
///   immediately without side effects or errors.
/// - The sync and async success hooks share identical event-construction
///   behavior; the async variants differ only in how the host invokes them.
/// - Failure hooks record the error metric only; they never read messages or
///   build summary/message events.
/// - No hook may raise into the host, whatever goes wrong internally.
#[async_trait]
pub trait CompletionCallback: Send + Sync {
    /// Fires before the provider call is dispatched. Unused.
    fn on_pre_call(&self, _call: &ChatCall) {}

    /// Fires with the raw provider response before post-processing. Unused.
    fn on_post_call(&self, _call: &ChatCall, _response: &ChatResponse, _timing: CallTiming) {}

    fn on_success(&self, call: &ChatCall, response: &ChatResponse, timing: CallTiming);

    fn on_failure(&self, call: &ChatCall, response: Option<&ChatResponse>, timing: CallTiming);

    async fn on_success_async(&self, call: &ChatCall, response: &ChatResponse, timing: CallTiming);

    async fn on_failure_async(
        &self,
        call: &ChatCall,
        response: Option<&ChatResponse>,
        timing: CallTiming,
    );
}

/// Callback adapter that turns completed chat calls into agent events.
///
/// Success path: enablement gate, trace-context resolution, completion
/// identity, message sequencing, redaction, then one summary event plus one
/// message event per flattened message handed to the sink. Failure path:
/// enablement gate, then a single error-metric increment.
pub struct NewRelicLogger {
    sink: Arc<dyn TelemetrySink>,
    trace_source: Arc<dyn TraceContextSource>,
    turn_off_message_logging: Option<bool>,
    env: EnvLookup,
}

impl NewRelicLogger {
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self::with_params(sink, NewRelicParams::default())
    }

    pub fn with_params(sink: Arc<dyn TelemetrySink>, params: NewRelicParams) -> Self {
        Self {
            sink,
            trace_source: Arc::new(HeaderTraceContext),
            turn_off_message_logging: params.turn_off_message_logging,
            env: Arc::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Replace the ambient trace lookup, e.g. with an agent-backed source.
    pub fn with_trace_source(mut self, source: Arc<dyn TraceContextSource>) -> Self {
        self.trace_source = source;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_env_for_tests(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    /// Settings are re-read on every invocation, never cached, so deferred
    /// agent configuration is picked up mid-process.
    fn settings(&self) -> TelemetryResult<AgentSettings> {
        AgentSettings::resolve(|key: &str| (self.env)(key), self.turn_off_message_logging)
            .ok_or(TelemetryError::Disabled)
    }

    fn emit_success(
        &self,
        call: &ChatCall,
        response: &ChatResponse,
        timing: CallTiming,
    ) -> TelemetryResult<()> {
        let settings = self.settings()?;
        let trace = self
            .trace_source
            .resolve(call)
            .ok_or(TelemetryError::TraceContextUnavailable)?;

        let completion_id = identity::resolve_completion_id(call, Some(response));
        let response_messages = response.choice_messages();
        let timeline = sequence::flatten_timeline(&call.messages, &response_messages);
        let events = telemetry::build_completion_events(
            &completion_id,
            &trace,
            call,
            response,
            &timeline,
            settings.redaction,
            timing,
        );

        self.sink.record_summary(events.summary);
        for message in events.messages {
            self.sink.record_message(message);
        }
        Ok(())
    }

    fn emit_failure(&self) -> TelemetryResult<()> {
        self.settings()?;
        self.sink.record_metric(telemetry::keys::METRIC_LLM_ERROR, 1);
        Ok(())
    }

    fn log_outcome(&self, outcome: TelemetryResult<()>) {
        match outcome {
            Ok(()) => {}
            Err(TelemetryError::Disabled) => {
                tracing::debug!("agent configuration missing; skipping telemetry");
            }
            Err(err) => {
                tracing::warn!(error = %err, "skipping chat completion telemetry");
            }
        }
    }
}

#[async_trait]
impl CompletionCallback for NewRelicLogger {
    fn on_success(&self, call: &ChatCall, response: &ChatResponse, timing: CallTiming) {
        self.log_outcome(self.emit_success(call, response, timing));
    }

    fn on_failure(&self, _call: &ChatCall, _response: Option<&ChatResponse>, _timing: CallTiming) {
        self.log_outcome(self.emit_failure());
    }

    async fn on_success_async(&self, call: &ChatCall, response: &ChatResponse, timing: CallTiming) {
        // The sink's record calls are in-memory agent operations, safe to
        // invoke directly from async context without spawning.
        self.log_outcome(self.emit_success(call, response, timing));
    }

    async fn on_failure_async(
        &self,
        _call: &ChatCall,
        _response: Option<&ChatResponse>,
        _timing: CallTiming,
    ) {
        self.log_outcome(self.emit_failure());
    }
}
