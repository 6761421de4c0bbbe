//! Request validation
//!
//! Classifies raw payloads by shape and checks each candidate entry against
//! the protocol rules and the registry. Failures are returned as values;
//! nothing in here panics or short-circuits a batch.

use serde_json::Value;

use crate::rpc::error::ErrorKind;
use crate::rpc::registry::{Arity, Registry};
use crate::rpc::types::{EntryId, JSONRPC_VERSION};

/// A raw payload after top-level classification.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Single(Value),
    Batch(Vec<Value>),
    /// Rejected before any entry could be examined; answered with `id: null`.
    Rejected(ErrorKind),
}

/// An entry that passed every check and may be dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCall {
    pub method: String,
    pub params: Option<Value>,
    pub id: EntryId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub kind: ErrorKind,
    pub id: EntryId,
}

pub fn classify_payload(raw: &str) -> Payload {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Payload::Rejected(ErrorKind::InvalidRequest);
    }

    let parsed: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(_) => return Payload::Rejected(ErrorKind::ParseError),
    };

    match parsed {
        Value::Object(_) => Payload::Single(parsed),
        // An empty array is a batch with nothing to answer.
        Value::Array(entries) => Payload::Batch(entries),
        _ => Payload::Rejected(ErrorKind::InvalidRequest),
    }
}

pub fn validate_entry(
    registry: &Registry,
    entry: &Value,
) -> Result<ValidatedCall, ValidationFailure> {
    let id = EntryId::of(entry);
    let fail = |kind| ValidationFailure {
        kind,
        id: id.clone(),
    };

    let Some(object) = entry.as_object() else {
        return Err(fail(ErrorKind::InvalidRequest));
    };

    if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(fail(ErrorKind::InvalidRequest));
    }

    let Some(method) = object.get("method").and_then(Value::as_str) else {
        return Err(fail(ErrorKind::InvalidRequest));
    };

    let Some(arity) = registry.lookup(method) else {
        return Err(fail(ErrorKind::MethodNotFound));
    };

    // An explicit `null` counts as no params.
    let params = object.get("params").filter(|value| !value.is_null()).cloned();
    let params_match = match arity {
        Arity::Zero => params.is_none(),
        Arity::One => params.is_some(),
    };
    if !params_match {
        return Err(fail(ErrorKind::InvalidParams));
    }

    Ok(ValidatedCall {
        method: method.to_string(),
        params,
        id,
    })
}
