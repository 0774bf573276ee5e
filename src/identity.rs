use uuid::Uuid;

use crate::model::{ChatCall, ChatResponse};

/// One lookup in the completion-id fallback chain.
type IdLookup = fn(&ChatCall, Option<&ChatResponse>) -> Option<String>;

/// Ordered fallback chain: request-side metadata, then the response object.
/// First success wins; extend by appending a lookup, the order is the
/// contract.
const ID_LOOKUPS: &[IdLookup] = &[from_call_metadata, from_response];

fn from_call_metadata(call: &ChatCall, _response: Option<&ChatResponse>) -> Option<String> {
    call.call_id.clone().filter(|id| !id.is_empty())
}

fn from_response(_call: &ChatCall, response: Option<&ChatResponse>) -> Option<String> {
    response?.id.clone().filter(|id| !id.is_empty())
}

/// Resolve the unique identifier for a completion.
///
/// Always returns a non-empty id. When no source yields one, a fresh UUID is
/// substituted and a single warning is logged; processing continues.
pub fn resolve_completion_id(call: &ChatCall, response: Option<&ChatResponse>) -> String {
    for lookup in ID_LOOKUPS {
        if let Some(id) = lookup(call, response) {
            return id;
        }
    }
    let id = Uuid::new_v4().to_string();
    tracing::warn!(
        model = %call.model,
        "no completion id in request or response; generated a synthetic one"
    );
    id
}
