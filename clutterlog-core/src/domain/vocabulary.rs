//! Category and Location vocabularies
//!
//! Both are ordered sets of strings that items refer to by value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularyKind {
    Category,
    Location,
}

impl VocabularyKind {
    /// Table holding the vocabulary
    pub fn table(&self) -> &'static str {
        match self {
            VocabularyKind::Category => "categories",
            VocabularyKind::Location => "locations",
        }
    }

    /// Column of `items` that references the vocabulary
    pub fn item_column(&self) -> &'static str {
        match self {
            VocabularyKind::Category => "category",
            VocabularyKind::Location => "location",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VocabularyKind::Category => "category",
            VocabularyKind::Location => "location",
        }
    }

    pub fn duplicate_message(&self) -> &'static str {
        match self {
            VocabularyKind::Category => "That category name already exists.",
            VocabularyKind::Location => "That location already exists.",
        }
    }
}

/// Vocabulary value with the number of items that use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub name: String,
    pub item_count: usize,
}

impl VocabularyEntry {
    pub fn in_use(&self) -> bool {
        self.item_count > 0
    }
}
