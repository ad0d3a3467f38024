//! Replacement template generation.
//!
//! Topics are checked in a fixed priority order, every matching topic
//! contributes all of its bank templates, and only then is the result cut
//! to the suggestion cap. Low-priority topics are the ones that get dropped.

use crate::bank::{Topic, OBJECT_PLACEHOLDER};
use crate::model::{Collection, Template};
use crate::rules::{joined_lower, RuleSet};

/// What makes a topic's templates eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// The topic keyword appears in the joined topic text.
    Keyword,
    /// As `Keyword`, or any age group carries a counting marker.
    KeywordOrAgeGroup,
}

const GENERATION_CHAIN: [(Topic, Trigger); 6] = [
    (Topic::Counting, Trigger::KeywordOrAgeGroup),
    (Topic::Addition, Trigger::Keyword),
    (Topic::Subtraction, Trigger::Keyword),
    (Topic::Multiplication, Trigger::Keyword),
    (Topic::Division, Trigger::Keyword),
    (Topic::Fractions, Trigger::Keyword),
];

/// Builds curriculum-aligned replacement templates for a collection.
#[derive(Debug, Clone, Copy)]
pub struct TemplateGenerator<'a> {
    rules: &'a RuleSet,
}

impl<'a> TemplateGenerator<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Topics whose templates would be emitted, in priority order.
    pub fn matched_topics(&self, collection: &Collection) -> Vec<Topic> {
        let topic_text = joined_lower(&collection.curriculum_topics);
        GENERATION_CHAIN
            .iter()
            .filter(|(topic, trigger)| {
                topic_text.contains(topic.keyword())
                    || (*trigger == Trigger::KeywordOrAgeGroup
                        && self.rules.age_groups_imply_counting(collection))
            })
            .map(|(topic, _)| *topic)
            .collect()
    }

    /// Between one and `max_suggestions` templates with the object noun
    /// filled in. Other placeholders are left for the renderer.
    pub fn generate(&self, collection: &Collection) -> Vec<Template> {
        let noun = self.rules.object_noun(collection);
        let bank = &self.rules.bank;

        let mut templates: Vec<Template> = self
            .matched_topics(collection)
            .into_iter()
            .flat_map(|topic| bank.templates(topic))
            .map(|t| t.fill(OBJECT_PLACEHOLDER, &noun))
            .collect();

        if templates.is_empty() {
            templates.push(bank.fallback.fill(OBJECT_PLACEHOLDER, &noun));
        }

        templates.truncate(self.rules.max_suggestions.max(1));
        templates
    }
}
