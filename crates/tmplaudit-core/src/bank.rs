//! Curriculum topics and the replacement template bank.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::model::Template;

/// Placeholder the generator substitutes with the collection's object noun.
pub const OBJECT_PLACEHOLDER: &str = "objects";

/// A mathematical skill area the bank has templates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Counting,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Fractions,
}

impl Topic {
    /// Generation priority order. Earlier topics survive the suggestion cap.
    pub const ALL: [Topic; 6] = [
        Topic::Counting,
        Topic::Addition,
        Topic::Subtraction,
        Topic::Multiplication,
        Topic::Division,
        Topic::Fractions,
    ];

    /// Substring searched for in a collection's lower-cased topic text.
    pub fn keyword(self) -> &'static str {
        match self {
            Topic::Counting => "counting",
            Topic::Addition => "addition",
            Topic::Subtraction => "subtraction",
            Topic::Multiplication => "multiplication",
            Topic::Division => "division",
            // singular so "fraction" and "fractions" both match
            Topic::Fractions => "fraction",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Counting => write!(f, "counting"),
            Topic::Addition => write!(f, "addition"),
            Topic::Subtraction => write!(f, "subtraction"),
            Topic::Multiplication => write!(f, "multiplication"),
            Topic::Division => write!(f, "division"),
            Topic::Fractions => write!(f, "fractions"),
        }
    }
}

/// Replacement templates per topic, plus the counting template used when no
/// topic matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateBank {
    pub fallback: Template,
    /// Topics named in a config file replace the built-in entry for that
    /// topic only. An empty list disables a topic.
    #[serde(deserialize_with = "merge_with_default_topics")]
    pub topics: BTreeMap<Topic, Vec<Template>>,
}

fn merge_with_default_topics<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Topic, Vec<Template>>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Topic, Vec<Template>>::deserialize(deserializer)?;
    let mut topics = TemplateBank::default().topics;
    topics.extend(overrides);
    Ok(topics)
}

impl TemplateBank {
    /// Templates for `topic` in bank order; empty if the bank has none.
    pub fn templates(&self, topic: Topic) -> &[Template] {
        self.topics.get(&topic).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Default for TemplateBank {
    fn default() -> Self {
        let entries: [(Topic, &[&str]); 6] = [
            (
                Topic::Counting,
                &[
                    "Count the {objects}. How many are there?",
                    "How many {objects} can you see?",
                ],
            ),
            (
                Topic::Addition,
                &[
                    "There are {num1} {objects} and {num2} more {objects}. How many {objects} in total?",
                    // increment reuses {num1}
                    "{Name} has {num1} {objects}. {Name2} gives {num1} more. How many {objects} does {Name} have now?",
                ],
            ),
            (
                Topic::Subtraction,
                &[
                    "{Name} had {num1} {objects}. {Pronoun} gave away {num2}. How many {objects} are left?",
                    "There were {num1} {objects}. {num2} were eaten. How many {objects} remain?",
                ],
            ),
            (
                Topic::Multiplication,
                &[
                    "Each box has {num1} {objects}. There are {num2} boxes. How many {objects} in total?",
                ],
            ),
            (
                Topic::Division,
                &[
                    "Share {num1} {objects} equally between {num2} friends. How many does each friend get?",
                ],
            ),
            (Topic::Fractions, &["What fraction of the {objects} are {color}?"]),
        ];

        Self {
            fallback: Template::from("Count the {objects}. How many are there?"),
            topics: entries
                .into_iter()
                .map(|(topic, texts)| {
                    (topic, texts.iter().copied().map(Template::from).collect())
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_display() {
        assert_eq!(Topic::Counting.to_string(), "counting");
        assert_eq!(Topic::Fractions.to_string(), "fractions");
    }

    #[test]
    fn fractions_keyword_matches_plural() {
        assert!("fractions year 3".contains(Topic::Fractions.keyword()));
    }

    #[test]
    fn default_bank_covers_every_topic() {
        let bank = TemplateBank::default();
        for topic in Topic::ALL {
            assert!(!bank.templates(topic).is_empty(), "no templates for {topic}");
        }
        assert_eq!(bank.templates(Topic::Counting).len(), 2);
        assert_eq!(bank.templates(Topic::Multiplication).len(), 1);
    }

    #[test]
    fn every_default_template_names_the_object() {
        let bank = TemplateBank::default();
        let all = Topic::ALL
            .iter()
            .flat_map(|t| bank.templates(*t))
            .chain(std::iter::once(&bank.fallback));
        for template in all {
            assert!(
                template.placeholders().contains(&OBJECT_PLACEHOLDER),
                "missing {{objects}}: {template}"
            );
        }
    }

    #[test]
    fn second_addition_template_reuses_first_quantity() {
        let bank = TemplateBank::default();
        let second = &bank.templates(Topic::Addition)[1];
        let placeholders = second.placeholders();
        assert_eq!(placeholders.iter().filter(|p| **p == "num1").count(), 2);
        assert!(!placeholders.contains(&"num2"));
    }

    #[test]
    fn missing_topic_yields_empty_slice() {
        let bank = TemplateBank {
            fallback: Template::from("Count the {objects}."),
            topics: BTreeMap::new(),
        };
        assert!(bank.templates(Topic::Division).is_empty());
    }

    #[test]
    fn partial_bank_from_toml_keeps_other_topics() {
        let bank: TemplateBank = toml::from_str(
            r#"
[topics]
counting = ["Count every {objects}."]
"#,
        )
        .unwrap();
        let defaults = TemplateBank::default();
        assert_eq!(
            bank.templates(Topic::Counting),
            &[Template::from("Count every {objects}.")]
        );
        for topic in &Topic::ALL[1..] {
            assert_eq!(bank.templates(*topic), defaults.templates(*topic));
        }
        assert_eq!(bank.fallback, defaults.fallback);
    }

    #[test]
    fn empty_topic_list_disables_topic() {
        let bank: TemplateBank = toml::from_str("[topics]\ndivision = []\n").unwrap();
        assert!(bank.templates(Topic::Division).is_empty());
        assert_eq!(bank.templates(Topic::Addition).len(), 2);
    }
}
