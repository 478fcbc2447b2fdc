//! Entity identifiers.
//!
//! [`Entity`] is the only identifier type a [`SocialGraph`](crate::SocialGraph)
//! stores. Graphs handed over from outside (loaders, generators) label their
//! nodes with [`NodeLabel`], which may still be numeric and is checked at the
//! model boundary.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A named person in the social graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entity(String);

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identifier carries visible text.
    ///
    /// Empty and whitespace-only names do not identify anyone and are treated
    /// as non-textual by validation.
    pub fn is_well_formed(&self) -> bool {
        is_textual(&self.0)
    }
}

pub(crate) fn is_textual(name: &str) -> bool {
    !name.trim().is_empty()
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Entity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Entity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Entity {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Entity {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&String> for Entity {
    fn from(name: &String) -> Self {
        Self(name.clone())
    }
}

/// Node label of a graph obtained from an external source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeLabel {
    Text(String),
    Numeric(u64),
}

impl NodeLabel {
    /// Returns the label text when the label is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(name) => Some(name),
            Self::Numeric(_) => None,
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(name) => f.write_str(name),
            Self::Numeric(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for NodeLabel {
    fn from(name: &str) -> Self {
        Self::Text(name.to_string())
    }
}

impl From<String> for NodeLabel {
    fn from(name: String) -> Self {
        Self::Text(name)
    }
}

impl From<u64> for NodeLabel {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}
