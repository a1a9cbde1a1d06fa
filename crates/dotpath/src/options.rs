use dotpath_core::Value;
use serde::{Deserialize, Serialize};

/// What a lookup reports for a leaf that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "value", rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Report the given value in place of the missing leaf.
    Default(Value),
    /// Leave the leaf out of the result entirely.
    Ignore,
}

impl MissingPolicy {
    pub fn is_ignore(&self) -> bool {
        matches!(self, MissingPolicy::Ignore)
    }

    /// Resolves a possibly missing leaf against this policy.
    pub fn resolve(&self, found: Option<&Value>) -> Option<Value> {
        match (found, self) {
            (Some(value), _) => Some(value.clone()),
            (None, MissingPolicy::Default(default)) => Some(default.clone()),
            (None, MissingPolicy::Ignore) => None,
        }
    }
}

impl Default for MissingPolicy {
    fn default() -> Self {
        MissingPolicy::Default(Value::Null)
    }
}

impl From<Value> for MissingPolicy {
    fn from(value: Value) -> Self {
        MissingPolicy::Default(value)
    }
}

/// Options for [`get`](crate::get) and [`get_matches`](crate::get_matches).
///
/// There is no `regex` flag: the two modes return different shapes, so regex
/// reads go through `get_matches` and `get` always splits on every dot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOptions {
    pub default: MissingPolicy,
    /// Treat a null root as an empty result instead of an error.
    pub allow_none: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HasOptions {
    pub allow_none: bool,
    pub regex: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetOptions {
    /// Create empty mappings for missing intermediate keys/attributes.
    pub make_missing: bool,
    pub regex: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutateOptions {
    /// Value handed to the transform when the leaf is missing.
    pub default: MissingPolicy,
    pub regex: bool,
}

impl Default for MutateOptions {
    fn default() -> Self {
        Self {
            default: MissingPolicy::Ignore,
            regex: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateOptions {
    pub regex: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteOptions {
    /// Silently skip keys/attributes that do not exist.
    pub allow_missing: bool,
    pub regex: bool,
}

impl Default for DeleteOptions {
    fn default() -> Self {
        Self {
            allow_missing: true,
            regex: false,
        }
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
