use thiserror::Error;

/// Failure to move a payload to the receiver and back.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected http status {status}")]
    UnexpectedStatus { status: u16 },
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("in-process receiver failed: {0}")]
    InProcess(String),
}

/// Caller-side errors. These never appear inside a protocol payload.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request id counter is exhausted")]
    IdsExhausted,
}

impl TransportError {
    pub fn unexpected_status(status: u16) -> Self {
        Self::UnexpectedStatus { status }
    }

    pub fn invalid_endpoint(message: impl Into<String>) -> Self {
        Self::InvalidEndpoint(message.into())
    }
}
