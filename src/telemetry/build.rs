use crate::config::RedactionPolicy;
use crate::model::{CallTiming, ChatCall, ChatResponse};
use crate::sequence::TimelineEntry;
use crate::trace::TraceContext;

use super::keys;
use super::types::{ChatCompletionMessage, ChatCompletionSummary};

/// One summary plus its owned messages. Emitted together, summary first; the
/// only cross-record guarantee is the shared completion id.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvents {
    pub summary: ChatCompletionSummary,
    pub messages: Vec<ChatCompletionMessage>,
}

/// Assemble the full event batch for one successful call.
///
/// `message_count` is taken from the finished timeline, never counted
/// incrementally, so it always equals the number of message events built.
/// Model and vendor fields pass through without transformation; structurally
/// absent response metadata is substituted with defaults.
pub fn build_completion_events(
    completion_id: &str,
    trace: &TraceContext,
    call: &ChatCall,
    response: &ChatResponse,
    timeline: &[TimelineEntry<'_>],
    redaction: RedactionPolicy,
    timing: CallTiming,
) -> CompletionEvents {
    let response_model = response
        .model
        .clone()
        .unwrap_or_else(|| call.model.clone());
    let vendor = call
        .vendor
        .clone()
        .unwrap_or_else(|| keys::DEFAULT_VENDOR.to_string());
    let usage = response.usage.unwrap_or_default();
    let finish_reason = response
        .finish_reason()
        .unwrap_or(keys::DEFAULT_FINISH_REASON)
        .to_string();
    let duration = call.api_duration_ms.or_else(|| timing.duration_ms());

    let summary = ChatCompletionSummary {
        id: completion_id.to_string(),
        request_id: completion_id.to_string(),
        trace_id: trace.trace_id.clone(),
        span_id: trace.span_id.clone(),
        request_model: call.model.clone(),
        response_model: response_model.clone(),
        finish_reason,
        message_count: timeline.len() as u32,
        vendor: vendor.clone(),
        ingest_source: keys::INGEST_SOURCE.to_string(),
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
        duration,
        temperature: call.temperature,
        max_tokens: call.max_tokens,
    };

    let messages = timeline
        .iter()
        .map(|entry| {
            let timestamp = if entry.is_response {
                timing.ended_epoch_ms()
            } else {
                timing.started_epoch_ms()
            };
            ChatCompletionMessage {
                id: format!("{completion_id}-{}", entry.sequence),
                request_id: completion_id.to_string(),
                completion_id: completion_id.to_string(),
                trace_id: trace.trace_id.clone(),
                span_id: trace.span_id.clone(),
                content: redaction
                    .include_content()
                    .then(|| entry.message.render_content()),
                role: entry.message.role.clone(),
                sequence: entry.sequence,
                response_model: response_model.clone(),
                vendor: vendor.clone(),
                ingest_source: keys::INGEST_SOURCE.to_string(),
                timestamp,
                is_response: entry.is_response,
            }
        })
        .collect();

    CompletionEvents { summary, messages }
}
