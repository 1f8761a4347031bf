// File: ./src/parser.rs
// The parsing orchestrator.
//
// Sequences the extractors over a shrinking working copy of the input text.
// Each extractor that matches removes its matched substring before the next
// one runs, so later extractors never re-match consumed text and the final
// leftover text becomes the title. The working copy is an explicit value
// threaded through the passes; concurrent parse calls share nothing mutable.
use anyhow::{Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;

use crate::config::KeywordConfig;
use crate::extract::category::CategoryExtractor;
use crate::extract::priority::PriorityExtractor;
use crate::extract::{self, Extract, date, disambiguation};
use crate::model::ParseResult;
use crate::pattern;
use crate::timeparse;

/// Confidence contributed by a time that validated through the time parser.
const TIME_CONFIDENCE: f64 = 0.9;

static DEFAULT_PARSER: Lazy<Parser> = Lazy::new(Parser::new);

/// A configured set of extractors. The default instance behind
/// [`parse_input`] uses the built-in dictionaries; hosts with site-local
/// vocabulary build their own via [`Parser::with_config`].
#[derive(Debug, Clone)]
pub struct Parser {
    priority: PriorityExtractor,
    category: CategoryExtractor,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            priority: PriorityExtractor::new(),
            category: CategoryExtractor::new(),
        }
    }

    pub fn with_config(config: &KeywordConfig) -> Self {
        Self {
            priority: PriorityExtractor::with_extra(&config.priority_extras()),
            category: CategoryExtractor::with_extra(&config.category_extras()),
        }
    }

    /// Parses one free-text task sentence into a structured record.
    ///
    /// `reference` defaults to now; `timezone` is an IANA id and defaults to
    /// the process-local timezone. An unknown timezone id or empty input
    /// fails fast — substituting a default there would mask caller bugs.
    pub fn parse_input(
        &self,
        text: &str,
        reference: Option<DateTime<Utc>>,
        timezone: Option<&str>,
    ) -> Result<ParseResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            bail!("cannot parse an empty input");
        }
        let reference = date::resolve_reference(reference, timezone)?;
        Ok(self.parse_with_reference(trimmed, reference))
    }

    /// The pure core: everything after timezone resolution. Deterministic
    /// for a fixed `(text, reference)` pair.
    pub fn parse_with_reference(&self, text: &str, reference: NaiveDate) -> ParseResult {
        let mut working = text.to_string();
        let mut confidences: Vec<f64> = Vec::new();
        let mut ambiguous_elements = Vec::new();

        // Date pass. A resolvable idiom sets the due date; a range idiom is
        // handed to disambiguation instead, and its phrase is still consumed
        // from the title even though unresolved.
        let mut due_date = None;
        let date_result = date::extract(&working, reference);
        if let Some(value) = date_result.value {
            due_date = Some(value);
            confidences.push(date_result.confidence);
            remove_first(&mut working, &date_result.matched_text);
            log::debug!("date pass consumed '{}'", date_result.matched_text);
        } else if let Some((idiom, (start, end))) = disambiguation::detect(&working) {
            let matched = working[start..end].to_string();
            let element = disambiguation::element_for(idiom, &matched, reference);
            if let Some(first) = element.suggestions.first() {
                confidences.push(first.confidence);
            }
            ambiguous_elements.push(element);
            working.replace_range(start..end, "");
            log::debug!("date pass deferred '{}' to disambiguation", matched);
        }

        // Time pass: time-shaped substrings in the remaining text, validated
        // through the time parser. An optional leading "at" is consumed with
        // the time.
        let mut due_time = None;
        if let Some(((start, end), parsed)) = find_time(&working) {
            due_time = Some(parsed.time);
            confidences.push(TIME_CONFIDENCE);
            working.replace_range(start..end, "");
        }

        // Priority pass: every matched keyword of the winning level is
        // consumed (they are directives, not title words).
        let priority_result = self.priority.extract(&working);
        if priority_result.value.is_some() {
            confidences.push(priority_result.confidence);
            for keyword in &priority_result.matched_keywords {
                if let Some((start, end)) = extract::find_keyword(&working, keyword) {
                    working.replace_range(start..end, "");
                }
            }
        }

        // Category pass: classification only; topical words stay in the
        // title.
        let category_result = self.category.extract(&working);
        if category_result.value.is_some() {
            confidences.push(category_result.confidence);
        }

        // The title must never be empty: when everything was consumed, fall
        // back to the cleaned original input.
        let mut title = tidy_title(&working);
        if title.is_empty() {
            title = collapse_whitespace(text);
        }

        // Fields that did not match contribute nothing, rather than a zero
        // that drags the average down.
        let confidence = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };

        ParseResult {
            title,
            due_date,
            due_time,
            priority: priority_result.value,
            category: category_result.value,
            confidence,
            ambiguous_elements,
        }
    }
}

/// First time-shaped substring that the time parser accepts. Bare compact
/// digit groups ("Flight 930") are not time-shaped in free text; the
/// standalone time parser still accepts them when given one directly.
fn find_time(text: &str) -> Option<((usize, usize), timeparse::ParsedTime)> {
    let re = pattern::cached(
        r"(?i)\b(?:at\s+)?(\d{1,2}:\d{2}\s*(?:am|pm)?|\d{1,2}\s*(?:am|pm)|noon|midnight)\b",
    );
    for caps in re.captures_iter(text) {
        if let Ok(parsed) = timeparse::parse_time(&caps[1]) {
            let m = caps.get(0).unwrap();
            return Some(((m.start(), m.end()), parsed));
        }
    }
    None
}

/// Removes the first occurrence of `matched` from the working text.
fn remove_first(working: &mut String, matched: &str) {
    if matched.is_empty() {
        return;
    }
    if let Some(start) = working.find(matched) {
        working.replace_range(start..start + matched.len(), "");
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapses whitespace and strips separator punctuation left dangling at
/// the edges after extraction ("Call mom," -> "Call mom").
fn tidy_title(text: &str) -> String {
    collapse_whitespace(text)
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-'))
        .to_string()
}

/// Parses with the process-wide default dictionaries.
pub fn parse_input(
    text: &str,
    reference: Option<DateTime<Utc>>,
    timezone: Option<&str>,
) -> Result<ParseResult> {
    DEFAULT_PARSER.parse_input(text, reference, timezone)
}
