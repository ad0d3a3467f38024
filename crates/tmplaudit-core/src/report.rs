//! Audit report assembly, JSON persistence and previews.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::model::{Catalog, Category, ClassificationRecord, Template};
use crate::rules::RuleSet;

/// Reason attached to every decorative-only entry.
pub const DECORATIVE_REASON: &str = "Contains decorative keywords (border/frame/divider)";

/// A collection excluded from question generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorativeEntry {
    pub name: String,
    pub reason: String,
    pub current_templates: Vec<Template>,
}

/// A collection whose existing templates should be replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedEntry {
    pub name: String,
    pub current: Vec<Template>,
    pub suggested: Vec<Template>,
}

/// A collection with no templates at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyEntry {
    pub name: String,
    pub suggested: Vec<Template>,
}

/// Result of auditing a whole catalog. Buckets keep catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub total_collections: usize,
    pub decorative_only: Vec<DecorativeEntry>,
    pub inappropriate_templates: Vec<FlaggedEntry>,
    pub empty_templates: Vec<EmptyEntry>,
    pub needs_update: Vec<FlaggedEntry>,
    pub good_templates: Vec<String>,
}

/// Number of collections per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub decorative: usize,
    pub empty: usize,
    pub inappropriate: usize,
    pub needs_update: usize,
    pub good: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Decorative => self.decorative,
            Category::Empty => self.empty,
            Category::Inappropriate => self.inappropriate,
            Category::NeedsUpdate => self.needs_update,
            Category::Good => self.good,
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Audit every collection in `catalog` with `rules`.
pub fn audit_catalog(catalog: &Catalog, rules: &RuleSet) -> AuditReport {
    let classifier = Classifier::new(rules);
    let mut report = AuditReport {
        total_collections: catalog.len(),
        ..Default::default()
    };

    for (name, collection) in catalog.iter() {
        report.push(classifier.classify(name, collection));
    }

    let counts = report.counts();
    tracing::info!(
        total = report.total_collections,
        good = counts.good,
        decorative = counts.decorative,
        inappropriate = counts.inappropriate,
        empty = counts.empty,
        needs_update = counts.needs_update,
        "catalog audit complete"
    );

    report
}

impl AuditReport {
    fn push(&mut self, record: ClassificationRecord) {
        let ClassificationRecord {
            name,
            category,
            current,
            suggested,
        } = record;

        match category {
            Category::Decorative => self.decorative_only.push(DecorativeEntry {
                name,
                reason: DECORATIVE_REASON.to_string(),
                current_templates: current,
            }),
            Category::Empty => self.empty_templates.push(EmptyEntry { name, suggested }),
            Category::Inappropriate => self.inappropriate_templates.push(FlaggedEntry {
                name,
                current,
                suggested,
            }),
            Category::NeedsUpdate => self.needs_update.push(FlaggedEntry {
                name,
                current,
                suggested,
            }),
            Category::Good => self.good_templates.push(name),
        }
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            decorative: self.decorative_only.len(),
            empty: self.empty_templates.len(),
            inappropriate: self.inappropriate_templates.len(),
            needs_update: self.needs_update.len(),
            good: self.good_templates.len(),
        }
    }

    /// Collection names in one bucket, in catalog order.
    pub fn names(&self, category: Category) -> Vec<&str> {
        match category {
            Category::Decorative => self.decorative_only.iter().map(|e| e.name.as_str()).collect(),
            Category::Empty => self.empty_templates.iter().map(|e| e.name.as_str()).collect(),
            Category::Inappropriate => self
                .inappropriate_templates
                .iter()
                .map(|e| e.name.as_str())
                .collect(),
            Category::NeedsUpdate => self.needs_update.iter().map(|e| e.name.as_str()).collect(),
            Category::Good => self.good_templates.iter().map(String::as_str).collect(),
        }
    }

    /// Which bucket a collection landed in.
    pub fn category_of(&self, name: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.names(*c).contains(&name))
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AuditReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// The first few entries of each bucket, for a presenter to render.
    pub fn preview(&self, limits: &PreviewLimits) -> ReportPreview<'_> {
        ReportPreview {
            counts: self.counts(),
            total_collections: self.total_collections,
            decorative: Slice::take(&self.decorative_only, limits.decorative),
            inappropriate: Slice::take(&self.inappropriate_templates, limits.inappropriate),
            empty: Slice::take(&self.empty_templates, limits.empty),
            needs_update: Slice::take(&self.needs_update, limits.needs_update),
        }
    }

    /// Flat text summary: counts, then a preview of each flagged bucket.
    pub fn to_text(&self, limits: &PreviewLimits) -> String {
        let preview = self.preview(limits);
        let counts = preview.counts;
        let mut out = String::new();

        out.push_str("QUESTION TEMPLATE AUDIT REPORT\n");
        out.push_str(&format!("Total collections: {}\n", preview.total_collections));
        out.push_str(&format!("Good templates: {}\n", counts.good));
        out.push_str(&format!("Decorative only: {}\n", counts.decorative));
        out.push_str(&format!("Inappropriate templates: {}\n", counts.inappropriate));
        out.push_str(&format!("Empty templates: {}\n", counts.empty));
        out.push_str(&format!("Needs update: {}\n", counts.needs_update));

        out.push_str(&format!("\nDecorative only ({}):\n", counts.decorative));
        for entry in preview.decorative.items {
            out.push_str(&format!("  - {}\n", entry.name));
        }
        write_hidden(&mut out, preview.decorative.hidden);

        out.push_str(&format!("\nInappropriate templates ({}):\n", counts.inappropriate));
        for entry in preview.inappropriate.items {
            write_flagged(&mut out, entry);
        }
        write_hidden(&mut out, preview.inappropriate.hidden);

        out.push_str(&format!("\nEmpty templates ({}):\n", counts.empty));
        for entry in preview.empty.items {
            out.push_str(&format!("  {}\n", entry.name));
            write_templates(&mut out, "suggested", &entry.suggested);
        }
        write_hidden(&mut out, preview.empty.hidden);

        out.push_str(&format!("\nNeeds update ({}):\n", counts.needs_update));
        for entry in preview.needs_update.items {
            write_flagged(&mut out, entry);
        }
        write_hidden(&mut out, preview.needs_update.hidden);

        out
    }
}

fn write_flagged(out: &mut String, entry: &FlaggedEntry) {
    out.push_str(&format!("  {}\n", entry.name));
    write_templates(out, "current", &entry.current);
    write_templates(out, "suggested", &entry.suggested);
}

fn write_templates(out: &mut String, label: &str, templates: &[Template]) {
    for t in templates {
        out.push_str(&format!("    {label}: {t}\n"));
    }
}

fn write_hidden(out: &mut String, hidden: usize) {
    if hidden > 0 {
        out.push_str(&format!("  ... and {hidden} more\n"));
    }
}

/// How many entries of each bucket a preview shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewLimits {
    pub decorative: usize,
    pub inappropriate: usize,
    pub empty: usize,
    pub needs_update: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            decorative: 10,
            inappropriate: 5,
            empty: 5,
            needs_update: 5,
        }
    }
}

/// Leading entries of a bucket and how many were left out.
#[derive(Debug, PartialEq, Eq)]
pub struct Slice<'a, T> {
    pub items: &'a [T],
    pub hidden: usize,
}

impl<'a, T> Slice<'a, T> {
    fn take(all: &'a [T], limit: usize) -> Self {
        let shown = limit.min(all.len());
        Self {
            items: &all[..shown],
            hidden: all.len() - shown,
        }
    }
}

/// Truncated view of a report. Good collections appear only in the counts.
#[derive(Debug, PartialEq, Eq)]
pub struct ReportPreview<'a> {
    pub counts: CategoryCounts,
    pub total_collections: usize,
    pub decorative: Slice<'a, DecorativeEntry>,
    pub inappropriate: Slice<'a, FlaggedEntry>,
    pub empty: Slice<'a, EmptyEntry>,
    pub needs_update: Slice<'a, FlaggedEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(
            "Border_Pack",
            Collection {
                name: "Border_Pack".into(),
                question_templates: vec!["Count the borders".into()],
                ..Default::default()
            },
        );
        catalog.insert(
            "Apples",
            Collection {
                name: "Apples".into(),
                curriculum_topics: vec!["addition".into()],
                primary_objects: vec!["apple".into()],
                ..Default::default()
            },
        );
        catalog.insert(
            "Fish",
            Collection {
                name: "Fish".into(),
                question_templates: vec!["How many fish are there?".into()],
                ..Default::default()
            },
        );
        catalog.insert(
            "Stars",
            Collection {
                name: "Stars".into(),
                question_templates: vec!["Colour the stars.".into()],
                ..Default::default()
            },
        );
        catalog.insert(
            "Frogs",
            Collection {
                name: "Frogs".into(),
                question_templates: vec!["Copy this pattern of frogs".into()],
                ..Default::default()
            },
        );
        catalog
    }

    #[test]
    fn buckets_every_collection_once() {
        let report = audit_catalog(&sample_catalog(), &RuleSet::default());
        assert_eq!(report.total_collections, 5);
        assert_eq!(report.counts().total(), 5);
        assert_eq!(report.category_of("Border_Pack"), Some(Category::Decorative));
        assert_eq!(report.category_of("Apples"), Some(Category::Empty));
        assert_eq!(report.category_of("Fish"), Some(Category::Good));
        assert_eq!(report.category_of("Stars"), Some(Category::NeedsUpdate));
        assert_eq!(report.category_of("Frogs"), Some(Category::Inappropriate));
        assert_eq!(report.category_of("Missing"), None);
    }

    #[test]
    fn decorative_entry_keeps_templates_and_reason() {
        let report = audit_catalog(&sample_catalog(), &RuleSet::default());
        let entry = &report.decorative_only[0];
        assert_eq!(entry.reason, DECORATIVE_REASON);
        assert_eq!(entry.current_templates, vec![Template::from("Count the borders")]);
    }

    #[test]
    fn bucket_order_follows_catalog() {
        let mut catalog = Catalog::new();
        for name in ["Zebra", "Ant", "Moose"] {
            catalog.insert(name, Collection::default());
        }
        let report = audit_catalog(&catalog, &RuleSet::default());
        assert_eq!(report.names(Category::Empty), vec!["Zebra", "Ant", "Moose"]);
    }

    #[test]
    fn json_keys_match_report_shape() {
        let report = audit_catalog(&sample_catalog(), &RuleSet::default());
        let value = serde_json::to_value(&report).unwrap();
        for key in [
            "total_collections",
            "decorative_only",
            "inappropriate_templates",
            "empty_templates",
            "needs_update",
            "good_templates",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["good_templates"][0], "Fish");
        assert!(value["empty_templates"][0].get("current").is_none());
    }

    #[test]
    fn json_roundtrip() {
        let report = audit_catalog(&sample_catalog(), &RuleSet::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.json");

        report.save_json(&path).unwrap();
        let loaded = AuditReport::load_json(&path).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn preview_truncates_and_counts_hidden() {
        let mut catalog = Catalog::new();
        for i in 0..12 {
            catalog.insert(
                format!("Frame_{i}"),
                Collection {
                    name: format!("Frame_{i}"),
                    ..Default::default()
                },
            );
        }
        let report = audit_catalog(&catalog, &RuleSet::default());
        let preview = report.preview(&PreviewLimits::default());
        assert_eq!(preview.decorative.items.len(), 10);
        assert_eq!(preview.decorative.hidden, 2);
        assert_eq!(preview.empty.items.len(), 0);
        assert_eq!(preview.empty.hidden, 0);
    }

    #[test]
    fn text_summary() {
        let report = audit_catalog(&sample_catalog(), &RuleSet::default());
        let text = report.to_text(&PreviewLimits::default());
        assert!(text.contains("Total collections: 5"));
        assert!(text.contains("  - Border_Pack"));
        assert!(text.contains("current: Copy this pattern of frogs"));
        assert!(text.contains("suggested: Count the Frogs. How many are there?"));
        assert!(!text.contains("... and"));
    }
}
