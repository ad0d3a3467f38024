//! Per-collection classification.
//!
//! Rules are evaluated top to bottom and the first one that applies decides
//! the category. A collection no rule claims needs its templates updated.

use crate::generator::TemplateGenerator;
use crate::model::{Category, ClassificationRecord, Collection};
use crate::rules::RuleSet;

/// A single link in the classification chain.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub category: Category,
    pub applies: fn(&RuleSet, &Collection) -> bool,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

fn is_decorative(rules: &RuleSet, c: &Collection) -> bool {
    rules.is_decorative(c)
}

fn has_no_templates(_: &RuleSet, c: &Collection) -> bool {
    c.question_templates.is_empty()
}

fn has_inappropriate_templates(rules: &RuleSet, c: &Collection) -> bool {
    rules.has_inappropriate_language(&c.question_templates)
}

fn has_good_templates(rules: &RuleSet, c: &Collection) -> bool {
    rules.has_quality_language(&c.question_templates)
}

/// Classification rules in evaluation order.
pub const CLASSIFICATION_CHAIN: [ClassificationRule; 4] = [
    ClassificationRule {
        category: Category::Decorative,
        applies: is_decorative,
    },
    ClassificationRule {
        category: Category::Empty,
        applies: has_no_templates,
    },
    ClassificationRule {
        category: Category::Inappropriate,
        applies: has_inappropriate_templates,
    },
    ClassificationRule {
        category: Category::Good,
        applies: has_good_templates,
    },
];

/// Category for collections no rule in the chain claims.
pub const FALLBACK_CATEGORY: Category = Category::NeedsUpdate;

/// Assigns each collection exactly one category and, where the category
/// calls for it, replacement templates.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    rules: &'a RuleSet,
    generator: TemplateGenerator<'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            generator: TemplateGenerator::new(rules),
        }
    }

    /// Category only, without generating suggestions.
    pub fn categorize(&self, collection: &Collection) -> Category {
        CLASSIFICATION_CHAIN
            .iter()
            .find(|rule| (rule.applies)(self.rules, collection))
            .map(|rule| rule.category)
            .unwrap_or(FALLBACK_CATEGORY)
    }

    /// Classify `collection`, stored in the catalog under `name`.
    pub fn classify(&self, name: &str, collection: &Collection) -> ClassificationRecord {
        let category = self.categorize(collection);
        let suggested = if category.suggests_replacements() {
            self.generator.generate(collection)
        } else {
            Vec::new()
        };

        tracing::debug!(
            collection = name,
            %category,
            suggestions = suggested.len(),
            "classified collection"
        );

        ClassificationRecord {
            name: name.to_string(),
            category,
            current: collection.question_templates.clone(),
            suggested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Template;

    fn collection(name: &str, templates: &[&str]) -> Collection {
        Collection {
            name: name.into(),
            curriculum_topics: vec!["counting".into()],
            primary_objects: vec!["fish".into()],
            question_templates: templates.iter().copied().map(Template::from).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn decorative_wins_over_everything() {
        let rules = RuleSet::default();
        let classifier = Classifier::new(&rules);
        for templates in [&[][..], &["How many borders?"][..], &["Use this border"][..]] {
            let record = classifier.classify("Border_Pack", &collection("Border_Pack", templates));
            assert_eq!(record.category, Category::Decorative);
            assert!(record.suggested.is_empty());
            assert_eq!(record.current.len(), templates.len());
        }
    }

    #[test]
    fn empty_gets_suggestions() {
        let rules = RuleSet::default();
        let record = Classifier::new(&rules).classify("Fish", &collection("Fish", &[]));
        assert_eq!(record.category, Category::Empty);
        assert_eq!(record.suggested.len(), 2);
        assert!(record.current.is_empty());
    }

    #[test]
    fn inappropriate_checked_before_quality() {
        let rules = RuleSet::default();
        let record = Classifier::new(&rules).classify(
            "Fish",
            &collection("Fish", &["Count the fish, then write your answer in the box"]),
        );
        assert_eq!(record.category, Category::Inappropriate);
        assert!(!record.suggested.is_empty());
        assert_eq!(record.current.len(), 1);
    }

    #[test]
    fn good_has_no_suggestions() {
        let rules = RuleSet::default();
        let fish = collection("Fish", &["How many fish are there?"]);
        let record = Classifier::new(&rules).classify("Fish", &fish);
        assert_eq!(record.category, Category::Good);
        assert!(record.suggested.is_empty());
    }

    #[test]
    fn needs_update_is_the_fallback() {
        let rules = RuleSet::default();
        let fish = collection("Fish", &["Colour the fish."]);
        let record = Classifier::new(&rules).classify("Fish", &fish);
        assert_eq!(record.category, Category::NeedsUpdate);
        assert_eq!(
            record.suggested[0].as_str(),
            "Count the fish. How many are there?"
        );
    }

    #[test]
    fn chain_order_is_fixed() {
        let order: Vec<Category> = CLASSIFICATION_CHAIN.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Decorative,
                Category::Empty,
                Category::Inappropriate,
                Category::Good
            ]
        );
        assert_eq!(FALLBACK_CATEGORY, Category::NeedsUpdate);
    }

    #[test]
    fn default_collection_is_empty_category() {
        let rules = RuleSet::default();
        let record = Classifier::new(&rules).classify("", &Collection::default());
        assert_eq!(record.category, Category::Empty);
        assert_eq!(
            record.suggested[0].as_str(),
            "Count the objects. How many are there?"
        );
    }
}
