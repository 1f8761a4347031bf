// File: ./src/timeparse.rs
// Tolerant parsing of standalone time expressions.
//
// Recognized forms, tried in order (first structural match wins):
//   1. 24-hour "H:MM" / "HH:MM"
//   2. 12-hour "H:MM am|pm"
//   3. compact digits "930" / "1430"
//   4. "noon" / "midnight"
//   5. hour with meridiem "9 AM"
//
// Validation is strict: an hour or minute that is out of range after
// conversion fails the parse, it is never clamped.
use chrono::{NaiveTime, Timelike};
use std::fmt;

const GENERIC_SUGGESTIONS: &[&str] = &["9:00 AM", "12:00 PM", "3:00 PM", "6:00 PM"];
const COMMON_TIMES: &[&str] = &["9:00 AM", "12:00 PM", "3:00 PM", "5:00 PM", "6:00 PM"];

/// A successfully parsed wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTime {
    pub time: NaiveTime,
    /// 12-hour display form, e.g. "3:00 PM".
    pub display: String,
}

impl ParsedTime {
    fn new(time: NaiveTime) -> Self {
        Self {
            display: display_time(time),
            time,
        }
    }

    /// Canonical 24-hour "HH:MM" form.
    pub fn hhmm(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// A failed parse, with ranked best-effort suggestions the caller can offer
/// to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeParseError {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TimeParseError {}

fn failure(message: impl Into<String>, input: &str) -> TimeParseError {
    TimeParseError {
        message: message.into(),
        suggestions: suggestions_for(input),
    }
}

/// Renders a time in the 12-hour display form ("3:00 PM", "12:00 AM").
pub fn display_time(time: NaiveTime) -> String {
    let meridiem = if time.hour() < 12 { "AM" } else { "PM" };
    let hour12 = match time.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour12, time.minute(), meridiem)
}

fn split_meridiem(s: &str) -> Option<(&str, bool)> {
    if let Some(stripped) = s.strip_suffix("am") {
        return Some((stripped, false));
    }
    if let Some(stripped) = s.strip_suffix("pm") {
        return Some((stripped, true));
    }
    None
}

fn to_24h(hour12: u32, is_pm: bool) -> u32 {
    if hour12 == 12 {
        if is_pm { 12 } else { 0 }
    } else if is_pm {
        hour12 + 12
    } else {
        hour12
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Parses a standalone time expression into a canonical wall-clock value.
pub fn parse_time(input: &str) -> Result<ParsedTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(failure("No time provided", trimmed));
    }
    let lower = trimmed.to_lowercase();

    // 12-hour forms, meridiem suffix first (as in smart input parsing):
    // "9:30pm", "9:30 pm", "9 pm", "12am".
    if let Some((core, is_pm)) = split_meridiem(&lower) {
        let core = core.trim();
        let (hour, minute) = if let Some((h_str, m_str)) = core.split_once(':') {
            if !all_digits(h_str) || m_str.len() != 2 || !all_digits(m_str) {
                return Err(failure(
                    format!("Unrecognized time format: '{}'", trimmed),
                    trimmed,
                ));
            }
            // Digit groups this short always fit in u32.
            (h_str.parse::<u32>().unwrap(), m_str.parse::<u32>().unwrap())
        } else if all_digits(core) && core.len() <= 2 {
            (core.parse::<u32>().unwrap(), 0)
        } else {
            return Err(failure(
                format!("Unrecognized time format: '{}'", trimmed),
                trimmed,
            ));
        };

        if !(1..=12).contains(&hour) {
            return Err(failure(
                format!("Hour {} is out of range for a 12-hour time (1-12)", hour),
                trimmed,
            ));
        }
        if minute > 59 {
            return Err(failure(
                format!("Minute {} is out of range (0-59)", minute),
                trimmed,
            ));
        }
        let time = NaiveTime::from_hms_opt(to_24h(hour, is_pm), minute, 0).unwrap();
        return Ok(ParsedTime::new(time));
    }

    // 24-hour "H:MM" / "HH:MM".
    if let Some((h_str, m_str)) = lower.split_once(':') {
        if all_digits(h_str) && h_str.len() <= 2 && m_str.len() == 2 && all_digits(m_str) {
            let hour = h_str.parse::<u32>().unwrap();
            let minute = m_str.parse::<u32>().unwrap();
            return match NaiveTime::from_hms_opt(hour, minute, 0) {
                Some(time) => Ok(ParsedTime::new(time)),
                None => Err(failure(
                    format!("'{}' is not a valid 24-hour time", trimmed),
                    trimmed,
                )),
            };
        }
        return Err(failure(
            format!("Unrecognized time format: '{}'", trimmed),
            trimmed,
        ));
    }

    // Compact digits: "930" -> 9:30, "1430" -> 14:30.
    if all_digits(&lower) && (3..=4).contains(&lower.len()) {
        let (h_str, m_str) = lower.split_at(lower.len() - 2);
        let hour = h_str.parse::<u32>().unwrap();
        let minute = m_str.parse::<u32>().unwrap();
        return match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(time) => Ok(ParsedTime::new(time)),
            None => Err(failure(
                format!("'{}' is not a valid compact time", trimmed),
                trimmed,
            )),
        };
    }

    match lower.as_str() {
        "noon" => Ok(ParsedTime::new(NaiveTime::from_hms_opt(12, 0, 0).unwrap())),
        "midnight" => Ok(ParsedTime::new(NaiveTime::from_hms_opt(0, 0, 0).unwrap())),
        _ => Err(failure(
            format!("Unrecognized time format: '{}'", trimmed),
            trimmed,
        )),
    }
}

fn first_number(input: &str) -> Option<u32> {
    let digits: String = input
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Up to 4 ranked suggestions derived from any digit group in the failed
/// input; a fixed generic set when no digits are present.
fn suggestions_for(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(n) = first_number(input) {
        if (1..=12).contains(&n) {
            out.push(format!("{}:00 AM", n));
            out.push(format!("{}:00 PM", n));
        }
        if n <= 23 {
            out.push(format!("{:02}:00", n));
        }
    }
    if out.is_empty() {
        out = GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect();
    }
    out.truncate(4);
    out
}

/// Candidate completions for an in-progress fragment ("9:", "no", "mid").
///
/// Used for interactive input; the fragment does not have to be a valid
/// time. Final parsing always goes through `parse_time`.
pub fn autocomplete_suggestions(partial: &str) -> Vec<String> {
    let lower = partial.trim().to_lowercase();
    if lower.is_empty() {
        return COMMON_TIMES.iter().map(|s| s.to_string()).collect();
    }

    let mut out = Vec::new();
    for literal in ["noon", "midnight"] {
        if literal.starts_with(&lower) {
            out.push(literal.to_string());
        }
    }

    if let Some((h_str, m_str)) = lower.split_once(':') {
        if all_digits(h_str)
            && let Ok(hour) = h_str.parse::<u32>()
            && hour <= 23
        {
            if m_str.is_empty() {
                for minute in ["00", "15", "30", "45"] {
                    out.push(format!("{}:{}", hour, minute));
                }
            } else if m_str.len() == 1 && all_digits(m_str) {
                for tail in ["0", "5"] {
                    out.push(format!("{}:{}{}", hour, m_str, tail));
                }
            } else if parse_time(&lower).is_ok() {
                out.push(lower.clone());
                if (1..=12).contains(&hour) {
                    out.push(format!("{} AM", lower));
                    out.push(format!("{} PM", lower));
                }
            }
        }
    } else if all_digits(&lower) && lower.len() <= 2 {
        let hour = lower.parse::<u32>().unwrap();
        if hour <= 23 {
            out.push(format!("{}:00", hour));
            out.push(format!("{}:30", hour));
        }
        if (1..=12).contains(&hour) {
            out.push(format!("{}:00 AM", hour));
            out.push(format!("{}:00 PM", hour));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hhmm(input: &str) -> String {
        parse_time(input).unwrap().hhmm()
    }

    #[test]
    fn test_24_hour_forms() {
        assert_eq!(hhmm("14:30"), "14:30");
        assert_eq!(hhmm("9:05"), "09:05");
        assert_eq!(hhmm("0:00"), "00:00");
        assert_eq!(hhmm("23:59"), "23:59");
    }

    #[test]
    fn test_12_hour_forms() {
        assert_eq!(hhmm("9:30 am"), "09:30");
        assert_eq!(hhmm("9:30pm"), "21:30");
        assert_eq!(hhmm("12:00 AM"), "00:00");
        assert_eq!(hhmm("12:00 PM"), "12:00");
        assert_eq!(hhmm("12:30 am"), "00:30");
    }

    #[test]
    fn test_compact_digits() {
        assert_eq!(hhmm("930"), "09:30");
        assert_eq!(hhmm("1430"), "14:30");
        assert!(parse_time("2530").is_err());
        assert!(parse_time("970").is_err());
    }

    #[test]
    fn test_literals_and_hour_meridiem() {
        assert_eq!(hhmm("noon"), "12:00");
        assert_eq!(hhmm("midnight"), "00:00");
        assert_eq!(hhmm("9 AM"), "09:00");
        assert_eq!(hhmm("3 PM"), "15:00");
        assert_eq!(hhmm("12am"), "00:00");
    }

    #[test]
    fn test_out_of_range_is_never_clamped() {
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("12:60").is_err());
        assert!(parse_time("13:00 pm").is_err());
        assert!(parse_time("0 am").is_err());
    }

    #[test]
    fn test_empty_and_garbage_fail() {
        assert!(parse_time("").is_err());
        assert!(parse_time("   ").is_err());
        assert!(parse_time("soonish").is_err());
    }

    #[test]
    fn test_failure_suggestions_from_digit_group() {
        let err = parse_time("9").unwrap_err();
        assert_eq!(err.suggestions, vec!["9:00 AM", "9:00 PM", "09:00"]);

        let err = parse_time("17").unwrap_err();
        assert_eq!(err.suggestions, vec!["17:00"]);

        let err = parse_time("at some point").unwrap_err();
        assert_eq!(err.suggestions.len(), 4);
        assert_eq!(err.suggestions[0], "9:00 AM");
    }

    #[test]
    fn test_display_form() {
        assert_eq!(parse_time("15:00").unwrap().display, "3:00 PM");
        assert_eq!(parse_time("00:10").unwrap().display, "12:10 AM");
        assert_eq!(parse_time("noon").unwrap().display, "12:00 PM");
    }

    #[test]
    fn test_autocomplete_fragments() {
        assert_eq!(
            autocomplete_suggestions("9:"),
            vec!["9:00", "9:15", "9:30", "9:45"]
        );
        assert_eq!(autocomplete_suggestions("no"), vec!["noon"]);
        assert_eq!(autocomplete_suggestions("mid"), vec!["midnight"]);
        assert_eq!(autocomplete_suggestions("9:3"), vec!["9:30", "9:35"]);
        assert!(autocomplete_suggestions("9").contains(&"9:00 AM".to_string()));
        assert!(!autocomplete_suggestions("").is_empty());
        assert!(autocomplete_suggestions("xyz").is_empty());
    }
}
