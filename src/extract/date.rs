// File: ./src/extract/date.rs
// Recognizes relative and absolute date idioms and resolves them against a
// timezone-correct reference date.
//
// Idiom classes are tried most specific first so that a generic token never
// swallows a more specific phrase. Range idioms ("next week", "end of
// month") are not resolved here; see extract::disambiguation.
use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

use crate::model::ExtractionResult;
use crate::pattern;

const ISO_CONFIDENCE: f64 = 0.95;
const MONTH_NAME_CONFIDENCE: f64 = 0.9;
const WEEKDAY_CONFIDENCE: f64 = 0.85;
const OFFSET_CONFIDENCE: f64 = 0.85;
const FIXED_CONFIDENCE: f64 = 0.9;

/// Projects the reference instant into the user's calendar.
///
/// All date arithmetic downstream operates on the (year, month, day) triple
/// obtained here; an instant is never shifted directly, so a UTC midnight
/// boundary cannot change the day the user meant. An unknown timezone id
/// fails fast rather than silently substituting a default.
pub(crate) fn resolve_reference(
    reference: Option<DateTime<Utc>>,
    timezone: Option<&str>,
) -> Result<NaiveDate> {
    let instant = reference.unwrap_or_else(Utc::now);
    match timezone {
        Some(id) => {
            let tz: Tz = id
                .parse()
                .map_err(|_| anyhow!("unknown IANA timezone id: '{}'", id))?;
            Ok(instant.with_timezone(&tz).date_naive())
        }
        None => Ok(instant.with_timezone(&Local).date_naive()),
    }
}

type Span = (usize, usize);

/// Resolves the first single-date idiom found in `text`.
pub fn extract(text: &str, reference: NaiveDate) -> ExtractionResult<NaiveDate> {
    let matched = match_iso(text)
        .map(|(span, date)| (span, date, ISO_CONFIDENCE))
        .or_else(|| {
            match_month_name(text, reference)
                .map(|(span, date)| (span, date, MONTH_NAME_CONFIDENCE))
        })
        .or_else(|| {
            match_next_weekday(text, reference)
                .map(|(span, date)| (span, date, WEEKDAY_CONFIDENCE))
        })
        .or_else(|| {
            match_offset(text, reference).map(|(span, date)| (span, date, OFFSET_CONFIDENCE))
        })
        .or_else(|| {
            match_fixed(text, reference).map(|(span, date)| (span, date, FIXED_CONFIDENCE))
        });

    match matched {
        None => ExtractionResult::none(),
        Some(((start, end), date, confidence)) => ExtractionResult {
            value: Some(date),
            matched_text: text[start..end].to_string(),
            confidence,
            matched_keywords: Vec::new(),
        },
    }
}

/// ISO `YYYY-MM-DD`. A digit group that is not a real calendar date
/// (2024-13-40) stays title text.
fn match_iso(text: &str) -> Option<(Span, NaiveDate)> {
    let re = pattern::cached(r"\b(\d{4})-(\d{2})-(\d{2})\b");
    for caps in re.captures_iter(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            let m = caps.get(0).unwrap();
            return Some(((m.start(), m.end()), date));
        }
    }
    None
}

fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let number = match &lower[..3.min(lower.len())] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(number)
}

/// Month-name forms: "March 5", "mar 5th", "March 5, 2026". A yearless date
/// already behind the reference rolls into the next year (quick-capture
/// input means the future).
fn match_month_name(text: &str, reference: NaiveDate) -> Option<(Span, NaiveDate)> {
    let re = pattern::cached(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t|tember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s*(\d{4}))?\b",
    );
    for caps in re.captures_iter(text) {
        let Some(month) = month_number(&caps[1]) else {
            continue;
        };
        let Ok(day) = caps[2].parse::<u32>() else {
            continue;
        };
        let date = match caps.get(3) {
            Some(year) => {
                let year: i32 = year.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            None => NaiveDate::from_ymd_opt(reference.year(), month, day).map(|candidate| {
                if candidate < reference {
                    NaiveDate::from_ymd_opt(reference.year() + 1, month, day)
                } else {
                    Some(candidate)
                }
                .unwrap_or(candidate)
            }),
        };
        if let Some(date) = date {
            let m = caps.get(0).unwrap();
            return Some(((m.start(), m.end()), date));
        }
    }
    None
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next occurrence of `target` strictly after `from`. A reference already on
/// the target weekday jumps a full 7 days, never same-day.
fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let mut date = from + Duration::days(1);
    while date.weekday() != target {
        date += Duration::days(1);
    }
    date
}

fn match_next_weekday(text: &str, reference: NaiveDate) -> Option<(Span, NaiveDate)> {
    let re = pattern::cached(
        r"(?i)\b(?:on\s+)?next\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    );
    let caps = re.captures(text)?;
    let target = weekday_from_name(&caps[1])?;
    let m = caps.get(0).unwrap();
    Some(((m.start(), m.end()), next_weekday(reference, target)))
}

/// Offsets: "in N days", "in N weeks", "N days from now".
fn match_offset(text: &str, reference: NaiveDate) -> Option<(Span, NaiveDate)> {
    let re_in = pattern::cached(r"(?i)\bin\s+(\d+)\s+(day|days|week|weeks)\b");
    if let Some(caps) = re_in.captures(text) {
        let amount: i64 = caps[1].parse().ok()?;
        let days = if caps[2].to_lowercase().starts_with("week") {
            amount.checked_mul(7)?
        } else {
            amount
        };
        let m = caps.get(0).unwrap();
        let date = reference.checked_add_signed(Duration::try_days(days)?)?;
        return Some(((m.start(), m.end()), date));
    }

    let re_from = pattern::cached(r"(?i)\b(\d+)\s+days?\s+from\s+now\b");
    let caps = re_from.captures(text)?;
    let amount: i64 = caps[1].parse().ok()?;
    let m = caps.get(0).unwrap();
    let date = reference.checked_add_signed(Duration::try_days(amount)?)?;
    Some(((m.start(), m.end()), date))
}

/// Fixed keywords "today" / "tomorrow", with an optional leading preposition
/// consumed as part of the span.
fn match_fixed(text: &str, reference: NaiveDate) -> Option<(Span, NaiveDate)> {
    let re = pattern::cached(r"(?i)\b(?:(?:on|by|due)\s+)?(today|tomorrow)\b");
    let caps = re.captures(text)?;
    let date = if caps[1].eq_ignore_ascii_case("today") {
        reference
    } else {
        reference + Duration::days(1)
    };
    let m = caps.get(0).unwrap();
    Some(((m.start(), m.end()), date))
}
