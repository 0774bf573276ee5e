use serde::Serialize;

/// `LlmChatCompletionSummary` custom event; one per completed call.
///
/// Serde renames produce the agent's wire attribute names. Optional
/// attributes are omitted entirely when absent, never serialized as null.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionSummary {
    pub id: String,
    /// Alias of `id`, kept for dashboard compatibility.
    pub request_id: String,
    pub trace_id: String,
    pub span_id: String,
    #[serde(rename = "request.model")]
    pub request_model: String,
    #[serde(rename = "response.model")]
    pub response_model: String,
    #[serde(rename = "response.choices.finish_reason")]
    pub finish_reason: String,
    /// Total messages across request and response; equals the number of
    /// [`ChatCompletionMessage`] events sharing this summary's id.
    #[serde(rename = "response.number_of_messages")]
    pub message_count: u32,
    pub vendor: String,
    pub ingest_source: String,
    #[serde(rename = "response.usage.prompt_tokens")]
    pub prompt_tokens: u32,
    #[serde(rename = "response.usage.completion_tokens")]
    pub completion_tokens: u32,
    #[serde(rename = "response.usage.total_tokens")]
    pub total_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(rename = "request.temperature", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(rename = "request.max_tokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// `LlmChatCompletionMessage` custom event; one per message in the flattened
/// request+response timeline. Owned by its summary through `completion_id`;
/// write-once, no lifecycle of its own.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatCompletionMessage {
    /// `{completion_id}-{sequence}`.
    pub id: String,
    pub request_id: String,
    pub completion_id: String,
    pub trace_id: String,
    pub span_id: String,
    /// Omitted entirely when redaction excludes it, so consumers can tell
    /// "redacted" apart from "empty content".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub role: String,
    pub sequence: u32,
    #[serde(rename = "response.model")]
    pub response_model: String,
    pub vendor: String,
    pub ingest_source: String,
    /// Epoch milliseconds; request messages stamp the call start, response
    /// messages the call end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Serialized only when true; request messages omit it.
    #[serde(skip_serializing_if = "is_false")]
    pub is_response: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary() -> ChatCompletionSummary {
        ChatCompletionSummary {
            id: "chatcmpl-1".into(),
            request_id: "chatcmpl-1".into(),
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            span_id: "00f067aa0ba902b7".into(),
            request_model: "gpt-4o".into(),
            response_model: "gpt-4o-2024-08-06".into(),
            finish_reason: "stop".into(),
            message_count: 3,
            vendor: "openai".into(),
            ingest_source: "litellm".into(),
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
            duration: None,
            temperature: None,
            max_tokens: None,
        }
    }

    #[test]
    fn summary_uses_wire_attribute_names() {
        let as_json = serde_json::to_value(summary()).expect("serialize");
        assert_eq!(as_json["request.model"], json!("gpt-4o"));
        assert_eq!(as_json["response.model"], json!("gpt-4o-2024-08-06"));
        assert_eq!(as_json["response.choices.finish_reason"], json!("stop"));
        assert_eq!(as_json["response.number_of_messages"], json!(3));
        assert_eq!(as_json["response.usage.prompt_tokens"], json!(10));
        assert_eq!(as_json["response.usage.total_tokens"], json!(30));
    }

    #[test]
    fn summary_omits_absent_optionals() {
        let as_json = serde_json::to_value(summary()).expect("serialize");
        let obj = as_json.as_object().expect("object");
        assert!(!obj.contains_key("duration"));
        assert!(!obj.contains_key("request.temperature"));
        assert!(!obj.contains_key("request.max_tokens"));
    }

    #[test]
    fn message_omits_content_key_when_redacted() {
        let message = ChatCompletionMessage {
            id: "chatcmpl-1-0".into(),
            request_id: "chatcmpl-1".into(),
            completion_id: "chatcmpl-1".into(),
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            span_id: "00f067aa0ba902b7".into(),
            content: None,
            role: "user".into(),
            sequence: 0,
            response_model: "gpt-4o".into(),
            vendor: "openai".into(),
            ingest_source: "litellm".into(),
            timestamp: None,
            is_response: false,
        };
        let as_json = serde_json::to_value(&message).expect("serialize");
        let obj = as_json.as_object().expect("object");
        assert!(!obj.contains_key("content"), "content must be absent, not null");
        assert!(!obj.contains_key("is_response"), "false is_response is omitted");

        let with_content = ChatCompletionMessage {
            content: Some(String::new()),
            is_response: true,
            ..message
        };
        let as_json = serde_json::to_value(&with_content).expect("serialize");
        // empty content is distinguishable from redacted content
        assert_eq!(as_json["content"], json!(""));
        assert_eq!(as_json["is_response"], json!(true));
    }
}
