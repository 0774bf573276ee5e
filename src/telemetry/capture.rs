#![cfg(test)]

use std::sync::Mutex;

use super::TelemetrySink;
use super::types::{ChatCompletionMessage, ChatCompletionSummary};

/// Records everything handed to the sink, for test assertions.
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub summaries: Mutex<Vec<ChatCompletionSummary>>,
    pub messages: Mutex<Vec<ChatCompletionMessage>>,
    pub metrics: Mutex<Vec<(String, u64)>>,
}

impl CaptureSink {
    pub fn summary_count(&self) -> usize {
        self.summaries.lock().unwrap().len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn metric_counts(&self) -> Vec<(String, u64)> {
        self.metrics.lock().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.summary_count() == 0 && self.message_count() == 0 && self.metric_counts().is_empty()
    }
}

impl TelemetrySink for CaptureSink {
    fn record_summary(&self, event: ChatCompletionSummary) {
        self.summaries.lock().unwrap().push(event);
    }

    fn record_message(&self, event: ChatCompletionMessage) {
        self.messages.lock().unwrap().push(event);
    }

    fn record_metric(&self, name: &str, count: u64) {
        self.metrics.lock().unwrap().push((name.to_string(), count));
    }
}
