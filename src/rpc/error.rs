//! JSON-RPC error taxonomy and the error type bound procedures return

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The fixed set of error kinds this server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    ImplementationError,
}

impl ErrorKind {
    pub fn code(&self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
            Self::ImplementationError => -32001,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid parameters",
            Self::InternalError => "Internal server error",
            Self::ImplementationError => "Implementation error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// The `error` member of an error response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    pub fn new(kind: ErrorKind, message: Option<String>, data: Option<Value>) -> Self {
        Self {
            code: kind.code(),
            message: message.unwrap_or_else(|| kind.message().to_string()),
            data,
        }
    }

    pub fn from_kind(kind: ErrorKind) -> Self {
        Self::new(kind, None, None)
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(kind, Some(message.into()), None)
    }
}

impl From<ErrorKind> for ErrorObject {
    fn from(kind: ErrorKind) -> Self {
        Self::from_kind(kind)
    }
}

/// Failure signalled by a bound procedure.
///
/// The dispatcher matches this exhaustively; there is no other channel for a
/// procedure to report an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcedureError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("implementation error: {0}")]
    Implementation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProcedureError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn implementation(message: impl Into<String>) -> Self {
        Self::Implementation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParams(_) => ErrorKind::InvalidParams,
            Self::Implementation(_) => ErrorKind::ImplementationError,
            Self::Internal(_) => ErrorKind::InternalError,
        }
    }

    pub fn to_error_object(&self) -> ErrorObject {
        let message = match self {
            Self::InvalidParams(message)
            | Self::Implementation(message)
            | Self::Internal(message) => message.clone(),
        };
        ErrorObject::with_message(self.kind(), message)
    }
}

pub type ProcedureResult = Result<Value, ProcedureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_protocol_table() {
        assert_eq!(ErrorKind::ParseError.code(), -32700);
        assert_eq!(ErrorKind::InvalidRequest.code(), -32600);
        assert_eq!(ErrorKind::MethodNotFound.code(), -32601);
        assert_eq!(ErrorKind::InvalidParams.code(), -32602);
        assert_eq!(ErrorKind::InternalError.code(), -32603);
        assert_eq!(ErrorKind::ImplementationError.code(), -32001);
    }

    #[test]
    fn error_object_omits_missing_data() {
        let json = serde_json::to_string(&ErrorObject::from_kind(ErrorKind::MethodNotFound))
            .expect("serialize error object");
        assert_eq!(json, r#"{"code":-32601,"message":"Method not found"}"#);
    }

    #[test]
    fn procedure_errors_keep_their_message() {
        let object = ProcedureError::implementation("disk is full").to_error_object();
        assert_eq!(object.code, -32001);
        assert_eq!(object.message, "disk is full");

        let object = ProcedureError::invalid_params("need two numbers").to_error_object();
        assert_eq!(object.code, -32602);
        assert_eq!(object.message, "need two numbers");
    }
}
