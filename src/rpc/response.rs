//! Response envelopes
//!
//! A response carries either a `result` or an `error`, never both. The two
//! shapes are separate structs joined by an untagged enum so that invariant
//! holds by construction.

use serde::Serialize;
use serde_json::Value;

use crate::rpc::error::{ErrorKind, ErrorObject};
use crate::rpc::types::{RequestId, JSONRPC_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    pub jsonrpc: String,
    pub result: Value,
    pub id: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub jsonrpc: String,
    pub error: ErrorObject,
    pub id: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn success(id: Option<RequestId>, result: Value) -> Self {
        Self::Success(SuccessResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result,
            id,
        })
    }

    pub fn error(id: Option<RequestId>, error: ErrorObject) -> Self {
        Self::Error(ErrorResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            error,
            id,
        })
    }

    /// Error response for a failure detected before any entry was looked at.
    pub fn top_level(kind: ErrorKind) -> Self {
        Self::error(None, ErrorObject::from_kind(kind))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn id(&self) -> Option<&RequestId> {
        match self {
            Self::Success(response) => response.id.as_ref(),
            Self::Error(response) => response.id.as_ref(),
        }
    }

    pub fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            Self::Success(_) => None,
            Self::Error(response) => Some(&response.error),
        }
    }
}

/// What the receiver sends back for one payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Single(Response),
    Batch(Vec<Response>),
}

impl Reply {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
