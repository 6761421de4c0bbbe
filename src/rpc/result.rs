//! Caller-side view of a single reply

use serde_json::Value;

/// One decoded reply object.
///
/// A reply counts as an error when it was flagged as one on construction
/// (for example because the body could not be decoded), or when it carries an
/// `error` member and no `result` member. Every accessor is total.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientResult {
    data: Value,
    flagged_error: bool,
}

impl ClientResult {
    pub fn new(data: Value) -> Self {
        Self::with_flag(data, false)
    }

    pub fn with_flag(data: Value, flagged_error: bool) -> Self {
        Self {
            data,
            flagged_error,
        }
    }

    /// A reply whose body could not be decoded.
    pub fn undecodable() -> Self {
        Self::with_flag(Value::Null, true)
    }

    /// Decodes reply text, flagging it as an error when it is not JSON.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str(text) {
            Ok(data) => Self::new(data),
            Err(_) => Self::undecodable(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.flagged_error
            || (self.data.get("error").is_some() && self.data.get("result").is_none())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_object()?.get("message")?.as_str()
    }

    pub fn error_code(&self) -> Option<i64> {
        self.error_object()?.get("code")?.as_i64()
    }

    pub fn error_data(&self) -> Option<&Value> {
        self.error_object()?.get("data")
    }

    pub fn result(&self) -> Option<&Value> {
        if self.is_error() {
            return None;
        }
        self.data.get("result")
    }

    pub fn id(&self) -> Option<&Value> {
        self.data.get("id").filter(|id| !id.is_null())
    }

    pub fn raw(&self) -> &Value {
        &self.data
    }

    fn error_object(&self) -> Option<&Value> {
        if !self.is_error() {
            return None;
        }
        self.data.get("error")
    }
}

impl From<Value> for ClientResult {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}
