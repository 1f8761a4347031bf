// File: ./src/extract/category.rs
// Classifies topical keywords into work / personal / school.
//
// Unlike the priority extractor, category keywords carry title meaning
// ("Buy groceries" without "groceries" is not a title), so classification
// never consumes text: `matched_text` stays empty.
use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::extract::{self, Extract, KeywordSet};
use crate::model::{Category, CategorySuggestion, ExtractionResult};

const WORK_KEYWORDS: &[&str] = &[
    "meeting",
    "client",
    "project",
    "deadline",
    "presentation",
    "report",
    "office",
    "interview",
    "standup",
    "follow up",
    "email",
];
const PERSONAL_KEYWORDS: &[&str] = &[
    "groceries",
    "shopping",
    "birthday",
    "family",
    "doctor",
    "dentist",
    "gym",
    "errand",
    "chores",
    "cleaning",
    "laundry",
];
const SCHOOL_KEYWORDS: &[&str] = &[
    "homework",
    "exam",
    "study",
    "class",
    "assignment",
    "lecture",
    "essay",
    "quiz",
    "semester",
    "study group",
];

const CATEGORY_BASE: f64 = 0.6;

static DEFAULT_EXTRACTOR: Lazy<CategoryExtractor> = Lazy::new(CategoryExtractor::new);

#[derive(Debug, Clone)]
pub struct CategoryExtractor {
    sets: Vec<KeywordSet<Category>>,
}

impl Default for CategoryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryExtractor {
    pub fn new() -> Self {
        Self {
            sets: vec![
                KeywordSet::new(Category::Work, WORK_KEYWORDS, CATEGORY_BASE),
                KeywordSet::new(Category::Personal, PERSONAL_KEYWORDS, CATEGORY_BASE),
                KeywordSet::new(Category::School, SCHOOL_KEYWORDS, CATEGORY_BASE),
            ],
        }
    }

    /// Built-in dictionaries extended with site-local keywords.
    pub(crate) fn with_extra(extra: &HashMap<Category, Vec<String>>) -> Self {
        let mut extractor = Self::new();
        for set in &mut extractor.sets {
            if let Some(keywords) = extra.get(&set.label) {
                set.extend_keywords(keywords);
            }
        }
        extractor
    }

    /// UI-facing verdict for a text, without consuming anything.
    pub fn suggestion(&self, text: &str) -> CategorySuggestion {
        let result = self.extract(text);
        CategorySuggestion {
            category: result.value,
            confidence: result.confidence,
            matched_keywords: result.matched_keywords,
        }
    }

    /// Read-only introspection of the dictionaries, in declaration order.
    pub fn keywords(&self) -> Vec<(Category, Vec<String>)> {
        self.sets
            .iter()
            .map(|set| (set.label, set.keywords.clone()))
            .collect()
    }
}

impl Extract for CategoryExtractor {
    type Value = Category;

    /// Winner-take-most: the strictly highest weighted score wins. A tie
    /// between categories is ambiguous and yields no category rather than a
    /// guess.
    fn extract(&self, text: &str) -> ExtractionResult<Category> {
        let mut scored: Vec<(&KeywordSet<Category>, extract::ScoredMatch)> = self
            .sets
            .iter()
            .map(|set| (set, extract::score_keywords(text, &set.keywords)))
            .filter(|(_, m)| !m.keywords.is_empty())
            .collect();
        scored.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));

        let Some((winner_set, winner_match)) = scored.first() else {
            return ExtractionResult::none();
        };
        if let Some((_, runner_up)) = scored.get(1)
            && runner_up.score == winner_match.score
        {
            log::debug!(
                "category tie at score {} between multiple labels; abstaining",
                winner_match.score
            );
            return ExtractionResult::none();
        }

        ExtractionResult {
            value: Some(winner_set.label),
            // Topical words stay in the title; nothing is consumed.
            matched_text: String::new(),
            confidence: extract::confidence_for(winner_set.base_confidence, winner_match.score),
            matched_keywords: winner_match.keywords.clone(),
        }
    }
}

/// Category verdict for a text (default dictionaries).
pub fn suggestion(text: &str) -> CategorySuggestion {
    DEFAULT_EXTRACTOR.suggestion(text)
}

/// The built-in category dictionaries, in declaration order.
pub fn keywords() -> Vec<(Category, Vec<String>)> {
    DEFAULT_EXTRACTOR.keywords()
}
