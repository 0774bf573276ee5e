/// Event-type and metric names handed to the agent.
/// Keep these stable; changing them is a breaking change for dashboards.
pub const EVENT_CHAT_COMPLETION_SUMMARY: &str = "LlmChatCompletionSummary";
pub const EVENT_CHAT_COMPLETION_MESSAGE: &str = "LlmChatCompletionMessage";

/// Count metric recorded when the underlying LLM call failed.
pub const METRIC_LLM_ERROR: &str = "LLM/LiteLLM/Error";

/// `ingest_source` attribute stamped on every event.
pub const INGEST_SOURCE: &str = "litellm";

/// Vendor attribute when the host supplies none.
pub const DEFAULT_VENDOR: &str = "litellm";

/// Substitute for `response.choices.finish_reason` when the response
/// carries none.
pub const DEFAULT_FINISH_REASON: &str = "unknown";
