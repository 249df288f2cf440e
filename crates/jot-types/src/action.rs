use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of verbs the store actor understands.
///
/// The HTTP adapter only ever issues `Set`, `Get`, and `ListKeys`; `Delete`
/// is available to embedders talking to the actor directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Insert or overwrite a key within a family.
    Set,
    /// Read a single key's value.
    Get,
    /// Remove a key from a family.
    Delete,
    /// List all keys in a family.
    ListKeys,
}

impl Action {
    /// `true` for actions that mutate store state.
    pub fn is_mutation(self) -> bool {
        matches!(self, Self::Set | Self::Delete)
    }

    /// `true` for family-wide actions that take no key.
    pub fn is_family_wide(self) -> bool {
        matches!(self, Self::ListKeys)
    }

    /// The wire name of this action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::ListKeys => "listkeys",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection for an action string outside the supported verb set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported action: {0:?}")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(Self::Set),
            "get" => Ok(Self::Get),
            "delete" => Ok(Self::Delete),
            "listkeys" => Ok(Self::ListKeys),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}
