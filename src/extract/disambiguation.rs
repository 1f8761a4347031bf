// File: ./src/extract/disambiguation.rs
// Turns range-denoting date phrases into ordered lists of concrete
// candidate dates for the user to pick from.
use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::extract::date;
use crate::model::{AmbiguityKind, AmbiguousElement, DateSuggestion};
use crate::pattern;

const NEXT_WEEK_CONFIDENCE: f64 = 0.8;
const END_OF_MONTH_CONFIDENCE: f64 = 0.7;

/// A phrase that denotes a range of plausible dates rather than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeIdiom {
    NextWeek,
    EndOfMonth,
}

/// Finds the earliest range idiom in the text, if any.
///
/// Only the first phrase is ever surfaced per input, even when several
/// appear; surfacing every phrase is a possible future extension of the
/// disambiguation protocol.
pub(crate) fn detect(text: &str) -> Option<(RangeIdiom, (usize, usize))> {
    let next_week = pattern::cached(r"(?i)\bnext\s+week\b")
        .find(text)
        .map(|m| (RangeIdiom::NextWeek, (m.start(), m.end())));
    let end_of_month = pattern::cached(r"(?i)\bend\s+of\s+(?:the\s+)?month\b")
        .find(text)
        .map(|m| (RangeIdiom::EndOfMonth, (m.start(), m.end())));

    match (next_week, end_of_month) {
        (Some(a), Some(b)) => Some(if a.1.0 <= b.1.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// "Monday, Jan 22" style label.
fn display_label(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

/// One suggestion per day from 7 to 14 days after the reference, inclusive.
fn next_week_suggestions(reference: NaiveDate) -> Vec<DateSuggestion> {
    (7..=14)
        .map(|offset| {
            let value = reference + Duration::days(offset);
            DateSuggestion {
                value,
                display: display_label(value),
                confidence: NEXT_WEEK_CONFIDENCE,
            }
        })
        .collect()
}

fn last_day_of_month(reference: NaiveDate) -> NaiveDate {
    let (year, month) = (reference.year(), reference.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap();
    first_of_next - Duration::days(1)
}

/// The trailing days of the reference month: at most the last 7, starting no
/// earlier than the reference day itself. Every suggestion stays inside the
/// reference month.
fn end_of_month_suggestions(reference: NaiveDate) -> Vec<DateSuggestion> {
    let last = last_day_of_month(reference);
    let start_day = reference.day().max(last.day().saturating_sub(6));
    (start_day..=last.day())
        .filter_map(|day| NaiveDate::from_ymd_opt(reference.year(), reference.month(), day))
        .map(|value| DateSuggestion {
            value,
            display: display_label(value),
            confidence: END_OF_MONTH_CONFIDENCE,
        })
        .collect()
}

pub(crate) fn element_for(
    idiom: RangeIdiom,
    matched_text: &str,
    reference: NaiveDate,
) -> AmbiguousElement {
    let suggestions = match idiom {
        RangeIdiom::NextWeek => next_week_suggestions(reference),
        RangeIdiom::EndOfMonth => end_of_month_suggestions(reference),
    };
    AmbiguousElement {
        original_text: matched_text.to_lowercase(),
        kind: AmbiguityKind::Date,
        suggestions,
    }
}

/// Candidate dates for the first range-denoting phrase in `text`.
///
/// Non-ambiguous or unrecognized text yields an empty list, not an error;
/// the only failure is an unknown timezone id.
pub fn generate_suggestions(
    text: &str,
    reference: Option<DateTime<Utc>>,
    timezone: Option<&str>,
) -> Result<Vec<AmbiguousElement>> {
    let reference = date::resolve_reference(reference, timezone)?;
    Ok(match detect(text) {
        Some((idiom, (start, end))) => vec![element_for(idiom, &text[start..end], reference)],
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        // Monday
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_next_week_fans_out_to_eight_days() {
        let element = element_for(RangeIdiom::NextWeek, "next week", reference());
        assert_eq!(element.suggestions.len(), 8);
        assert_eq!(
            element.suggestions.first().map(|s| s.value),
            NaiveDate::from_ymd_opt(2024, 1, 22)
        );
        assert_eq!(
            element.suggestions.last().map(|s| s.value),
            NaiveDate::from_ymd_opt(2024, 1, 29)
        );
        assert!(element.suggestions.iter().all(|s| s.confidence == 0.8));
        assert_eq!(element.suggestions[0].display, "Monday, Jan 22");
    }

    #[test]
    fn test_end_of_month_stays_in_month() {
        let element = element_for(RangeIdiom::EndOfMonth, "end of month", reference());
        assert!(!element.suggestions.is_empty());
        for suggestion in &element.suggestions {
            assert_eq!(suggestion.value.month(), 1);
            assert_eq!(suggestion.value.year(), 2024);
            assert_eq!(suggestion.confidence, 0.7);
        }
        assert_eq!(
            element.suggestions.first().map(|s| s.value),
            NaiveDate::from_ymd_opt(2024, 1, 25)
        );
    }

    #[test]
    fn test_end_of_month_near_the_boundary() {
        let late = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let element = element_for(RangeIdiom::EndOfMonth, "end of month", late);
        let days: Vec<u32> = element.suggestions.iter().map(|s| s.value.day()).collect();
        assert_eq!(days, vec![30, 31]);

        // A December reference must not leak into January.
        let december = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
        let element = element_for(RangeIdiom::EndOfMonth, "end of month", december);
        assert!(element.suggestions.iter().all(|s| s.value.month() == 12));
    }

    #[test]
    fn test_detection_is_case_insensitive_and_normalizes() {
        let out = generate_suggestions(
            "plan Next WEEK",
            Some("2024-01-15T12:00:00Z".parse().unwrap()),
            Some("UTC"),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].original_text, "next week");
        assert_eq!(out[0].kind, AmbiguityKind::Date);
    }

    #[test]
    fn test_the_variant_of_end_of_month() {
        let (idiom, span) = detect("taxes end of the month").unwrap();
        assert_eq!(idiom, RangeIdiom::EndOfMonth);
        assert_eq!(&"taxes end of the month"[span.0..span.1], "end of the month");
    }

    #[test]
    fn test_non_ambiguous_text_yields_empty_list() {
        let out = generate_suggestions(
            "tomorrow",
            Some("2024-01-15T12:00:00Z".parse().unwrap()),
            Some("UTC"),
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_first_phrase_in_text_order_wins() {
        let (idiom, _) = detect("end of month or next week").unwrap();
        assert_eq!(idiom, RangeIdiom::EndOfMonth);
        let (idiom, _) = detect("next week or end of month").unwrap();
        assert_eq!(idiom, RangeIdiom::NextWeek);
    }
}
