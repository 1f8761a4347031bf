// File: ./src/pattern.rs
// Process-wide cache of compiled regular expressions.
//
// Extractors match user text with word-boundary patterns built from
// dictionary keywords at runtime, so the same pattern text recurs on every
// parse call. Entries are keyed by pattern text and immutable once inserted;
// the map only ever grows.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the compiled regex for `pattern`, compiling on first use.
///
/// Every pattern passed here is either a literal or built from
/// `regex::escape`d keyword text, so compilation cannot fail at runtime.
pub fn cached(pattern: &str) -> Regex {
    let mut cache = PATTERN_CACHE.lock().unwrap();
    if let Some(re) = cache.get(pattern) {
        return re.clone();
    }
    let re = Regex::new(pattern)
        .unwrap_or_else(|e| panic!("invalid internal pattern '{}': {}", pattern, e));
    cache.insert(pattern.to_string(), re.clone());
    re
}
