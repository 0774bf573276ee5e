use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Message body as the host hands it over: plain text, or a list of
/// provider-specific parts (multimodal payloads, tool results).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<serde_json::Value>),
}

/// A single conversation message. Roles are free-form strings (user, system,
/// assistant, tool, function, context, ...), not an enum, because the host
/// forwards whatever the provider accepted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<serde_json::Value>,
}

impl ChatMessage {
    pub fn text(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Some(MessageContent::Text(content.into())),
            tool_calls: None,
        }
    }

    /// Render the message body to a single string for telemetry.
    ///
    /// Tool calls take priority over content; structured content is
    /// serialized to a JSON string; a missing body renders as `""`. Whether
    /// the rendered string is emitted at all is the redaction policy's call.
    pub fn render_content(&self) -> String {
        if let Some(calls) = &self.tool_calls {
            return serde_json::to_string(calls).unwrap_or_else(|_| calls.to_string());
        }
        match &self.content {
            None => String::new(),
            Some(MessageContent::Text(text)) => text.clone(),
            Some(MessageContent::Parts(parts)) => {
                serde_json::to_string(parts).unwrap_or_else(|_| format!("{parts:?}"))
            }
        }
    }
}

/// Request-side view of one chat-completion call, as passed to every hook.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatCall {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    /// Upstream provider name; events fall back to a fixed vendor when absent.
    #[serde(default)]
    pub vendor: Option<String>,
    /// Request-side completion identifier, when the host assigned one.
    #[serde(default)]
    pub call_id: Option<String>,
    /// Distributed-tracing headers propagated with the call.
    #[serde(default)]
    pub propagation_headers: HashMap<String, String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Host-measured API duration; preferred over the timestamp difference.
    #[serde(default)]
    pub api_duration_ms: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Messages carried by the response choices, in choice order. Choices
    /// without a message contribute nothing.
    pub fn choice_messages(&self) -> Vec<&ChatMessage> {
        self.choices
            .iter()
            .filter_map(|choice| choice.message.as_ref())
            .collect()
    }

    /// First choice's finish reason, if the response carries one.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first()?.finish_reason.as_deref()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Start/end wall-clock pair the host records around the call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallTiming {
    pub started_at: SystemTime,
    pub ended_at: SystemTime,
}

impl CallTiming {
    pub fn new(started_at: SystemTime, ended_at: SystemTime) -> Self {
        Self {
            started_at,
            ended_at,
        }
    }

    /// Duration in milliseconds; `None` when the clock pair is unusable
    /// (end before start, e.g. after a clock adjustment).
    pub fn duration_ms(&self) -> Option<f64> {
        self.ended_at
            .duration_since(self.started_at)
            .ok()
            .map(|d| d.as_secs_f64() * 1_000.0)
    }

    pub fn started_epoch_ms(&self) -> Option<i64> {
        epoch_ms(self.started_at)
    }

    pub fn ended_epoch_ms(&self) -> Option<i64> {
        epoch_ms(self.ended_at)
    }
}

fn epoch_ms(t: SystemTime) -> Option<i64> {
    t.duration_since(UNIX_EPOCH).ok().map(|d| d.as_millis() as i64)
}
