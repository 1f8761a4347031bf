// File: ./src/extract/mod.rs
// Extractor family: shared keyword-matching primitive plus the concrete
// extractors (priority, category, date, disambiguation).
pub mod category;
pub mod date;
pub mod disambiguation;
pub mod priority;

use crate::model::ExtractionResult;
use crate::pattern;

/// An extractor classifies a span of free text into one typed field plus a
/// confidence score. "No match" is a value (`ExtractionResult::none()`),
/// never an error.
pub trait Extract {
    type Value;
    fn extract(&self, text: &str) -> ExtractionResult<Self::Value>;
}

/// One classification label with its keyword vocabulary and base confidence.
#[derive(Debug, Clone)]
pub(crate) struct KeywordSet<L> {
    pub label: L,
    pub keywords: Vec<String>,
    pub base_confidence: f64,
}

impl<L> KeywordSet<L> {
    pub fn new(label: L, keywords: &[&str], base_confidence: f64) -> Self {
        Self {
            label,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            base_confidence,
        }
    }

    /// Appends site-local keywords (config overlay). Built-ins keep their
    /// position so introspection order stays stable.
    pub fn extend_keywords(&mut self, extra: &[String]) {
        for keyword in extra {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() && !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
    }
}

/// Whole-word, case-insensitive search for `keyword` (a word or a phrase).
/// Returns the byte span of the first occurrence.
pub(crate) fn find_keyword(text: &str, keyword: &str) -> Option<(usize, usize)> {
    let re = pattern::cached(&format!(r"(?i)\b{}\b", regex::escape(keyword)));
    re.find(text).map(|m| (m.start(), m.end()))
}

/// Weight of one matched keyword: phrases count double, long words count
/// half again.
pub(crate) fn keyword_weight(keyword: &str) -> f64 {
    if keyword.contains(' ') {
        2.0
    } else if keyword.chars().count() > 6 {
        1.5
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScoredMatch {
    /// Matched keywords in dictionary order.
    pub keywords: Vec<String>,
    pub score: f64,
    /// Byte span of the first keyword occurrence in the text.
    pub first_span: Option<(usize, usize)>,
}

/// Matches every keyword of a set against `text` and totals the weights.
pub(crate) fn score_keywords(text: &str, keywords: &[String]) -> ScoredMatch {
    let mut result = ScoredMatch::default();
    for keyword in keywords {
        if let Some(span) = find_keyword(text, keyword) {
            result.keywords.push(keyword.clone());
            result.score += keyword_weight(keyword);
            let earlier = result.first_span.is_none_or(|(start, _)| span.0 < start);
            if earlier {
                result.first_span = Some(span);
            }
        }
    }
    result
}

/// Maps a weighted score onto [0, 0.95], anchored at the label's base
/// confidence and strictly increasing in the score below the ceiling.
pub(crate) fn confidence_for(base: f64, score: f64) -> f64 {
    if score <= 0.0 {
        0.0
    } else {
        (base + 0.1 * (score - 1.0)).min(0.95)
    }
}
