use crate::model::ChatMessage;

/// One message in the flattened request+response timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry<'a> {
    pub message: &'a ChatMessage,
    /// 0-based position in the flattened timeline; defines emission order.
    pub sequence: u32,
    pub is_response: bool,
}

/// Flatten request messages then response messages into a single timeline,
/// preserving each list's internal order.
///
/// Position in the input lists is authoritative; there is no reordering by
/// role or timestamp, and sequence numbers are gapless over the
/// concatenation. An empty list contributes nothing and does not shift the
/// other list beyond natural concatenation order.
pub fn flatten_timeline<'a>(
    request: &'a [ChatMessage],
    response: &[&'a ChatMessage],
) -> Vec<TimelineEntry<'a>> {
    request
        .iter()
        .map(|message| (message, false))
        .chain(response.iter().map(|message| (*message, true)))
        .enumerate()
        .map(|(index, (message, is_response))| TimelineEntry {
            message,
            sequence: index as u32,
            is_response,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msgs(specs: &[(&str, &str)]) -> Vec<ChatMessage> {
        specs
            .iter()
            .map(|(role, content)| ChatMessage::text(*role, *content))
            .collect()
    }

    #[test]
    fn request_then_response_with_contiguous_sequences() {
        let request = msgs(&[("system", "a"), ("user", "b")]);
        let reply = ChatMessage::text("assistant", "c");
        let timeline = flatten_timeline(&request, &[&reply]);

        assert_eq!(timeline.len(), 3);
        let roles: Vec<_> = timeline.iter().map(|e| e.message.role.as_str()).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
        let sequences: Vec<_> = timeline.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, [0, 1, 2]);
        assert!(!timeline[0].is_response);
        assert!(!timeline[1].is_response);
        assert!(timeline[2].is_response);
    }

    #[test]
    fn empty_request_starts_response_at_zero() {
        let reply = ChatMessage::text("assistant", "c");
        let timeline = flatten_timeline(&[], &[&reply]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].sequence, 0);
        assert!(timeline[0].is_response);
    }

    #[test]
    fn empty_response_keeps_request_order() {
        let request = msgs(&[("user", "a"), ("user", "b")]);
        let timeline = flatten_timeline(&request, &[]);
        let sequences: Vec<_> = timeline.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, [0, 1]);
        assert!(timeline.iter().all(|e| !e.is_response));
    }

    #[test]
    fn both_empty_yields_empty_timeline() {
        assert!(flatten_timeline(&[], &[]).is_empty());
    }

    #[test]
    fn non_assistant_response_messages_are_sequenced_too() {
        let request = msgs(&[("user", "q")]);
        let tool = ChatMessage::text("tool", "result");
        let reply = ChatMessage::text("assistant", "a");
        let timeline = flatten_timeline(&request, &[&tool, &reply]);

        let roles: Vec<_> = timeline.iter().map(|e| e.message.role.as_str()).collect();
        assert_eq!(roles, ["user", "tool", "assistant"]);
        assert_eq!(timeline[1].sequence, 1);
        assert!(timeline[1].is_response);
    }

    #[test]
    fn sequences_are_gapless_for_larger_conversations() {
        let request = msgs(&[("system", "s"), ("user", "1"), ("assistant", "2"), ("user", "3")]);
        let replies = msgs(&[("assistant", "4"), ("assistant", "5")]);
        let refs: Vec<&ChatMessage> = replies.iter().collect();
        let timeline = flatten_timeline(&request, &refs);

        for (i, entry) in timeline.iter().enumerate() {
            assert_eq!(entry.sequence as usize, i);
        }
        assert_eq!(timeline.len(), 6);
    }
}
