use serde::{Deserialize, Serialize};

use crate::action::Action;

/// A single operation against the store, sent into the actor's inbox.
///
/// `family` must always be non-empty. `key` must be non-empty for `Set`,
/// `Get`, and `Delete`; it is ignored for family-wide actions. `value` is
/// only meaningful for `Set`. The actor enforces these shape rules and
/// answers a per-request error for violations — a bad request never takes
/// the actor down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Logical namespace partitioning keys into independent tables.
    pub family: String,
    /// Entry name within the family. Empty for family-wide actions.
    #[serde(default)]
    pub key: String,
    /// Payload for mutating actions. Empty otherwise.
    #[serde(default)]
    pub value: String,
    /// What to do.
    pub action: Action,
}

impl Request {
    /// Insert or overwrite `key` in `family`.
    pub fn set(
        family: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            family: family.into(),
            key: key.into(),
            value: value.into(),
            action: Action::Set,
        }
    }

    /// Read `key` from `family`.
    pub fn get(family: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            key: key.into(),
            value: String::new(),
            action: Action::Get,
        }
    }

    /// Remove `key` from `family`.
    pub fn delete(family: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            key: key.into(),
            value: String::new(),
            action: Action::Delete,
        }
    }

    /// List all keys in `family`.
    pub fn list_keys(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            key: String::new(),
            value: String::new(),
            action: Action::ListKeys,
        }
    }

    /// Check the shape rules for this request's action.
    ///
    /// Returns a human-readable description of the first violation, or
    /// `None` if the request is well-formed.
    pub fn shape_violation(&self) -> Option<&'static str> {
        if self.family.is_empty() {
            return Some("family must not be empty");
        }
        if !self.action.is_family_wide() && self.key.is_empty() {
            return Some("key must not be empty for this action");
        }
        None
    }
}
