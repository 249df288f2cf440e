use serde::{Deserialize, Serialize};

/// Tagged result of a store operation.
///
/// The actor answers exactly one `Reply` (or an error) per request.
/// Failure never travels inside a payload — it uses the error side of the
/// channel — so downstream code never has to guess a decoding shape from
/// the action that produced the reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Reply {
    /// A single stored value.
    Value(String),
    /// All keys of a family, in ascending lexicographic order.
    KeyList(Vec<String>),
    /// Acknowledgment with no payload (mutations).
    Empty,
}

impl Reply {
    /// The value payload, if this reply carries one.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The key listing, if this reply carries one.
    pub fn as_key_list(&self) -> Option<&[String]> {
        match self {
            Self::KeyList(keys) => Some(keys),
            _ => None,
        }
    }

    /// The variant name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::KeyList(_) => "key_list",
            Self::Empty => "empty",
        }
    }
}
