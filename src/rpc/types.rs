//! Identifiers shared by requests and responses

use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// A request id as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl RequestId {
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(string_id) = value.as_str() {
            return Some(Self::String(string_id.to_string()));
        }

        value.as_i64().map(Self::Number)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::Number(value) => Value::Number((*value).into()),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => write!(f, "{value:?}"),
            Self::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// The `id` member of an incoming entry.
///
/// `Absent` (no `id` key at all) is the only thing that makes an entry a
/// notification. `Null` covers an explicit `null` as well as an id that could
/// not be identified; such entries are still answered, with `"id": null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryId {
    Absent,
    Null,
    Present(RequestId),
}

impl EntryId {
    /// Reads the id of a candidate entry without judging the rest of it.
    pub fn of(entry: &Value) -> Self {
        let Some(object) = entry.as_object() else {
            return Self::Null;
        };

        match object.get("id") {
            None => Self::Absent,
            Some(value) => RequestId::from_value(value).map_or(Self::Null, Self::Present),
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The id to echo in a response. `None` serializes as `null`.
    pub fn response_id(&self) -> Option<RequestId> {
        match self {
            Self::Present(id) => Some(id.clone()),
            Self::Absent | Self::Null => None,
        }
    }
}
