//! Phrase table entries.

use crate::plural::PluralCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from phrase key to entry. Ordered, so serialized blobs have sorted keys.
pub type PhraseTable = BTreeMap<String, Entry>;

/// Stored translation for one phrase key.
///
/// Serialized as either a bare string or `{"one": .., "other": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// A single format string.
    Simple(String),
    /// Singular and plural format strings.
    Plural { one: String, other: String },
}

impl Entry {
    pub fn simple(text: impl Into<String>) -> Self {
        Self::Simple(text.into())
    }

    pub fn plural(one: impl Into<String>, other: impl Into<String>) -> Self {
        Self::Plural {
            one: one.into(),
            other: other.into(),
        }
    }

    pub fn is_plural(&self) -> bool {
        matches!(self, Self::Plural { .. })
    }

    /// Text used by singular lookups. A plural pair answers with its `one` form.
    pub fn singular(&self) -> &str {
        match self {
            Self::Simple(text) => text,
            Self::Plural { one, .. } => one,
        }
    }

    /// Form for a plural bucket. A simple entry answers every bucket with its text.
    pub fn select(&self, category: PluralCategory) -> &str {
        match (self, category) {
            (Self::Simple(text), _) => text,
            (Self::Plural { one, .. }, PluralCategory::One) => one,
            (Self::Plural { other, .. }, PluralCategory::Other) => other,
        }
    }
}
