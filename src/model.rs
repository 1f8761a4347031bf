// File: ./src/model.rs
// Data model for parse results.
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

/// Task urgency. Ordering is by urgency (`Low < Medium < High`), which is
/// what breaks score ties in the priority extractor.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Topical classification of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    School,
}

/// One extractor's verdict on the current working text.
///
/// Invariant: `value` is present exactly when `confidence > 0`.
/// `matched_text` is the exact substring the extractor consumed from the
/// input; it may be empty for extractors whose keywords stay in the title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult<T> {
    pub value: Option<T>,
    pub matched_text: String,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
}

impl<T> ExtractionResult<T> {
    /// The "no match" verdict.
    pub fn none() -> Self {
        Self {
            value: None,
            matched_text: String::new(),
            confidence: 0.0,
            matched_keywords: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.value.is_some()
    }
}

/// What kind of input phrase required disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AmbiguityKind {
    Date,
}

/// One candidate resolution for an ambiguous phrase. Suggestion lists are
/// ordered nearest/most-likely first and the order is meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSuggestion {
    pub value: NaiveDate,
    pub display: String,
    pub confidence: f64,
}

/// An input phrase that denotes a range of plausible dates rather than one,
/// surfaced to the caller for disambiguation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbiguousElement {
    /// The normalized (lower-cased) matched phrase.
    pub original_text: String,
    pub kind: AmbiguityKind,
    pub suggestions: Vec<DateSuggestion>,
}

/// Result of the category suggestion operation (UI-facing).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySuggestion {
    pub category: Option<Category>,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
}

fn serialize_hhmm<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(t) => serializer.serialize_some(&t.format("%H:%M").to_string()),
        None => serializer.serialize_none(),
    }
}

/// The structured record produced by one parse call. Immutable; owned by the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Canonical 24-hour wall-clock time, serialized as "HH:MM".
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_hhmm"
    )]
    pub due_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub confidence: f64,
    pub ambiguous_elements: Vec<AmbiguousElement>,
}
