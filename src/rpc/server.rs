//! Receiver side of the protocol
//!
//! Takes raw request text through validation and dispatch and builds the
//! reply. Single requests and batch entries share one per-entry pipeline;
//! notifications run but never contribute a response.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::rpc::dispatcher::{dispatch, DispatchOutcome};
use crate::rpc::error::ErrorObject;
use crate::rpc::registry::Registry;
use crate::rpc::response::{Reply, Response};
use crate::rpc::types::EntryId;
use crate::rpc::validator::{classify_payload, validate_entry, Payload};

#[derive(Debug, Clone)]
pub struct Server {
    registry: Arc<Registry>,
}

impl Server {
    pub fn new(registry: Registry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Processes one raw payload. `None` means nothing is to be sent back.
    pub fn handle(&self, raw: &str) -> Option<Reply> {
        match classify_payload(raw) {
            Payload::Rejected(kind) => {
                debug!(code = kind.code(), "payload rejected");
                Some(Reply::Single(Response::top_level(kind)))
            }
            Payload::Single(entry) => self.handle_entry(&entry).map(Reply::Single),
            Payload::Batch(entries) => self.handle_batch(&entries),
        }
    }

    /// Like [`Server::handle`], serialized to response text.
    pub fn handle_text(&self, raw: &str) -> Result<Option<String>, serde_json::Error> {
        self.handle(raw).map(|reply| reply.to_json()).transpose()
    }

    /// Processes every entry in order. Returns `None` when all of them were
    /// notifications.
    pub fn handle_batch(&self, entries: &[Value]) -> Option<Reply> {
        let responses: Vec<Response> = entries
            .iter()
            .filter_map(|entry| self.handle_entry(entry))
            .collect();

        debug!(
            entries = entries.len(),
            responses = responses.len(),
            "batch processed"
        );

        if responses.is_empty() {
            None
        } else {
            Some(Reply::Batch(responses))
        }
    }

    pub fn handle_entry(&self, entry: &Value) -> Option<Response> {
        match validate_entry(&self.registry, entry) {
            Ok(call) => {
                let id = call.id.clone();
                build_response(&id, dispatch(&self.registry, call))
            }
            Err(failure) => {
                debug!(
                    code = failure.kind.code(),
                    notification = failure.id.is_notification(),
                    "entry failed validation"
                );
                build_response(&failure.id, Err(ErrorObject::from_kind(failure.kind)))
            }
        }
    }
}

/// Turns an outcome into a response, or drops it for a notification.
pub fn build_response(id: &EntryId, outcome: DispatchOutcome) -> Option<Response> {
    if id.is_notification() {
        return None;
    }

    Some(match outcome {
        Ok(result) => Response::success(id.response_id(), result),
        Err(error) => Response::error(id.response_id(), error),
    })
}
