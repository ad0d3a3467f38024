//! Keyword sets and the pure predicates built on them.
//!
//! All matching is plain substring containment on lower-cased, space-joined
//! text. There is no tokenization, so "frame" also matches "frameworks".

use serde::{Deserialize, Serialize};

use crate::bank::TemplateBank;
use crate::model::{Collection, Template};

/// Join items with single spaces and lower-case the result.
pub fn joined_lower<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Immutable classification and generation data, built once per run and
/// shared by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Matched against the lower-cased name and thematic categories.
    pub decorative_keywords: Vec<String>,
    /// Matched against the lower-cased curriculum topics.
    pub decorative_topic_markers: Vec<String>,
    /// Phrases that flag a template as unsuitable for children.
    pub inappropriate_phrases: Vec<String>,
    /// Primary objects that never serve as the object noun (compared lower-cased).
    pub excluded_objects: Vec<String>,
    /// Substrings removed from the name when falling back to it for the noun.
    /// Case-sensitive and applied in order.
    pub name_strip_tokens: Vec<String>,
    /// Noun used when neither primary objects nor the name yield one.
    pub fallback_noun: String,
    /// Any of these in the existing templates marks them as good.
    pub quality_keywords: Vec<String>,
    /// Age-group substrings (case-sensitive) that enable counting templates.
    pub counting_age_markers: Vec<String>,
    /// Cap on suggested templates, applied after generation.
    pub max_suggestions: usize,
    pub bank: TemplateBank,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            decorative_keywords: strings(&[
                "border",
                "divider",
                "frame",
                "decoration",
                "background",
                "clipart",
                "embellishment",
                "ornament",
            ]),
            decorative_topic_markers: strings(&["decorative", "decoration"]),
            inappropriate_phrases: strings(&[
                "write your answer in",
                "draw in the frame",
                "use this border",
                "decorative element",
                "copy this pattern",
            ]),
            excluded_objects: strings(&["background", "scene", "border", "frame", "decoration"]),
            name_strip_tokens: strings(&["by", "ScrappinDoodles"]),
            fallback_noun: "objects".to_string(),
            quality_keywords: strings(&[
                "how many",
                "count",
                "add",
                "subtract",
                "total",
                "left",
                "altogether",
            ]),
            counting_age_markers: strings(&["Year", "Reception"]),
            max_suggestions: 3,
            bank: TemplateBank::default(),
        }
    }
}

impl RuleSet {
    /// Lower-case every list that is matched against lower-cased text, so
    /// entries loaded from a config file match regardless of their casing.
    pub fn normalize_case(&mut self) {
        for list in [
            &mut self.decorative_keywords,
            &mut self.decorative_topic_markers,
            &mut self.inappropriate_phrases,
            &mut self.excluded_objects,
            &mut self.quality_keywords,
        ] {
            for entry in list.iter_mut() {
                *entry = entry.to_lowercase();
            }
        }
    }

    /// True if the collection is ornamental content that should never get
    /// questions.
    pub fn is_decorative(&self, collection: &Collection) -> bool {
        let name = collection.name.to_lowercase();
        let categories = joined_lower(&collection.thematic_categories);
        if self
            .decorative_keywords
            .iter()
            .any(|k| name.contains(k.as_str()) || categories.contains(k.as_str()))
        {
            return true;
        }

        let topics = joined_lower(&collection.curriculum_topics);
        contains_any(&topics, &self.decorative_topic_markers)
    }

    /// True if any template uses phrasing unsuitable for children.
    pub fn has_inappropriate_language(&self, templates: &[Template]) -> bool {
        contains_any(&joined_lower(templates), &self.inappropriate_phrases)
    }

    /// True if the templates already ask a curriculum-style question.
    pub fn has_quality_language(&self, templates: &[Template]) -> bool {
        contains_any(&joined_lower(templates), &self.quality_keywords)
    }

    /// True if an age-group label implies counting practice.
    pub fn age_groups_imply_counting(&self, collection: &Collection) -> bool {
        collection.age_groups.iter().any(|group| {
            self.counting_age_markers
                .iter()
                .any(|marker| group.contains(marker.as_str()))
        })
    }

    /// The countable noun to put into templates for this collection.
    ///
    /// The first primary object not in the exclusion list wins. Otherwise the
    /// first word of the cleaned-up name is used, then `fallback_noun`.
    pub fn object_noun(&self, collection: &Collection) -> String {
        let from_objects = collection.primary_objects.iter().find(|obj| {
            let lower = obj.to_lowercase();
            !self.excluded_objects.iter().any(|e| *e == lower)
        });
        if let Some(obj) = from_objects {
            return obj.clone();
        }

        let mut name = collection.name.replace('_', " ");
        for token in &self.name_strip_tokens {
            name = name.replace(token.as_str(), "");
        }
        name.split_whitespace()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_noun.clone())
    }
}
