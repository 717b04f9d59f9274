use serde::{Deserialize, Serialize};
use std::fmt;

/// The part of a block a `ChangeEvent` touches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeElement {
    Field,
    Comment,
    Collapsed,
    Disabled,
    Inline,
    Mutation,
    /// Editor-specific element, replayed through `BlockGraph::apply_custom_change`.
    Custom(String),
}

impl ChangeElement {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeElement::Field => "field",
            ChangeElement::Comment => "comment",
            ChangeElement::Collapsed => "collapsed",
            ChangeElement::Disabled => "disabled",
            ChangeElement::Inline => "inline",
            ChangeElement::Mutation => "mutation",
            ChangeElement::Custom(name) => name,
        }
    }
}

impl fmt::Display for ChangeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque value recorded on either side of a change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Text(String),
    Bool(bool),
    #[default]
    Null,
}

impl ChangeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ChangeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Booleans, plus the `"true"`/`"false"` text some editors record.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ChangeValue::Bool(b) => Some(*b),
            ChangeValue::Text(s) => match s.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            ChangeValue::Null => None,
        }
    }

    /// True for `Null` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            ChangeValue::Text(s) => s.is_empty(),
            ChangeValue::Bool(_) => false,
            ChangeValue::Null => true,
        }
    }
}

impl fmt::Display for ChangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeValue::Text(s) => write!(f, "{:?}", s),
            ChangeValue::Bool(b) => write!(f, "{}", b),
            ChangeValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for ChangeValue {
    fn from(value: &str) -> Self {
        ChangeValue::Text(value.to_string())
    }
}

impl From<String> for ChangeValue {
    fn from(value: String) -> Self {
        ChangeValue::Text(value)
    }
}

impl From<bool> for ChangeValue {
    fn from(value: bool) -> Self {
        ChangeValue::Bool(value)
    }
}

impl<S: Into<ChangeValue>> From<Option<S>> for ChangeValue {
    fn from(value: Option<S>) -> Self {
        value.map_or(ChangeValue::Null, Into::into)
    }
}
