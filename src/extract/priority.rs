// File: ./src/extract/priority.rs
// Classifies urgency keywords into low / medium / high.
use std::collections::HashMap;

use crate::extract::{self, Extract, KeywordSet};
use crate::model::{ExtractionResult, Priority};

const HIGH_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "important",
    "critical",
    "high priority",
    "top priority",
    "emergency",
];
const MEDIUM_KEYWORDS: &[&str] = &["medium priority", "normal priority"];
const LOW_KEYWORDS: &[&str] = &[
    "whenever",
    "someday",
    "eventually",
    "low priority",
    "no rush",
];

const HIGH_BASE: f64 = 0.85;
const MEDIUM_BASE: f64 = 0.75;
const LOW_BASE: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct PriorityExtractor {
    sets: Vec<KeywordSet<Priority>>,
}

impl Default for PriorityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityExtractor {
    pub fn new() -> Self {
        Self {
            sets: vec![
                KeywordSet::new(Priority::High, HIGH_KEYWORDS, HIGH_BASE),
                KeywordSet::new(Priority::Medium, MEDIUM_KEYWORDS, MEDIUM_BASE),
                KeywordSet::new(Priority::Low, LOW_KEYWORDS, LOW_BASE),
            ],
        }
    }

    /// Built-in dictionaries extended with site-local keywords.
    pub(crate) fn with_extra(extra: &HashMap<Priority, Vec<String>>) -> Self {
        let mut extractor = Self::new();
        for set in &mut extractor.sets {
            if let Some(keywords) = extra.get(&set.label) {
                set.extend_keywords(keywords);
            }
        }
        extractor
    }
}

impl Extract for PriorityExtractor {
    type Value = Priority;

    /// The level with the highest weighted score wins; ties favor the
    /// higher-urgency level. No match means no value and confidence 0 —
    /// defaulting to medium is a presentation concern, not ours.
    fn extract(&self, text: &str) -> ExtractionResult<Priority> {
        let mut best: Option<(&KeywordSet<Priority>, extract::ScoredMatch)> = None;
        for set in &self.sets {
            let scored = extract::score_keywords(text, &set.keywords);
            if scored.keywords.is_empty() {
                continue;
            }
            let wins = match &best {
                None => true,
                Some((best_set, best_scored)) => {
                    scored.score > best_scored.score
                        || (scored.score == best_scored.score && set.label > best_set.label)
                }
            };
            if wins {
                best = Some((set, scored));
            }
        }

        match best {
            None => ExtractionResult::none(),
            Some((set, scored)) => {
                let matched_text = scored
                    .first_span
                    .map(|(start, end)| text[start..end].to_string())
                    .unwrap_or_default();
                ExtractionResult {
                    value: Some(set.label),
                    matched_text,
                    confidence: extract::confidence_for(set.base_confidence, scored.score),
                    matched_keywords: scored.keywords,
                }
            }
        }
    }
}
