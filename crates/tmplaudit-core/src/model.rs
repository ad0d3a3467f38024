//! Core data model types for tmplaudit.
//!
//! These are the types the audit passes around: catalog collections as read
//! from the input document, question templates, and per-collection
//! classification records.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A question template: sentence text with `{name}` placeholders that a
/// downstream renderer fills in with concrete values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Placeholder names in order of appearance, duplicates included.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                break;
            };
            let name = &after[..end];
            if !name.is_empty() && !name.contains('{') {
                names.push(name);
            }
            rest = &after[end + 1..];
        }
        names
    }

    /// Replace every `{name}` with `value`, leaving other placeholders intact.
    pub fn fill(&self, name: &str, value: &str) -> Template {
        Template(self.0.replace(&format!("{{{name}}}"), value))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Template {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Template {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Template {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One catalog entry: a themed set of educational content and its metadata.
///
/// Every field defaults to empty so that incomplete entries still classify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Collection {
    /// Display name, also used for object-noun fallback.
    pub name: String,
    /// Curriculum topic tags (e.g. "addition", "Year 2").
    pub curriculum_topics: Vec<String>,
    /// Grade-band labels (e.g. "Reception", "Year 1").
    pub age_groups: Vec<String>,
    /// Free-text theme tags.
    pub thematic_categories: Vec<String>,
    /// Candidate countable nouns, most relevant first.
    pub primary_objects: Vec<String>,
    /// Existing question templates, possibly empty.
    pub question_templates: Vec<Template>,
}

/// The full catalog, keyed by collection name in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub collections: IndexMap<String, Collection>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, collection: Collection) {
        self.collections.insert(key.into(), collection);
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collection)> + '_ {
        self.collections.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Collection)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Collection)>>(iter: I) -> Self {
        Self {
            collections: iter.into_iter().collect(),
        }
    }
}

/// The audit verdict for a single collection. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Decorative,
    Empty,
    Inappropriate,
    NeedsUpdate,
    Good,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Decorative,
        Category::Empty,
        Category::Inappropriate,
        Category::NeedsUpdate,
        Category::Good,
    ];

    /// Whether records in this category carry generated replacement templates.
    pub fn suggests_replacements(self) -> bool {
        matches!(
            self,
            Category::Empty | Category::Inappropriate | Category::NeedsUpdate
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Decorative => write!(f, "decorative"),
            Category::Empty => write!(f, "empty"),
            Category::Inappropriate => write!(f, "inappropriate"),
            Category::NeedsUpdate => write!(f, "needs_update"),
            Category::Good => write!(f, "good"),
        }
    }
}

/// Outcome of classifying one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Catalog key of the collection.
    pub name: String,
    pub category: Category,
    /// The collection's original templates.
    #[serde(default)]
    pub current: Vec<Template>,
    /// Replacement candidates; empty for `decorative` and `good`.
    #[serde(default)]
    pub suggested: Vec<Template>,
}
