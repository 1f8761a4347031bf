// Keyword classification: winner-take-most scoring, ties, introspection,
// and the site-local config overlay.
use chrono::{DateTime, NaiveDate, Utc};
use tasklex::{
    Category, KeywordConfig, Parser, Priority, category_keywords, category_suggestion,
};

fn monday_noon_utc() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
}

#[test]
fn test_category_winner_take_most() {
    let suggestion = category_suggestion("Meeting with client about project deadline");
    assert_eq!(suggestion.category, Some(Category::Work));
    assert!(suggestion.confidence > 0.0);
    assert!(suggestion.matched_keywords.contains(&"meeting".to_string()));
    assert!(suggestion.matched_keywords.contains(&"client".to_string()));
}

#[test]
fn test_category_abstains_without_keywords() {
    let suggestion = category_suggestion("Do something tomorrow");
    assert_eq!(suggestion.category, None);
    assert_eq!(suggestion.confidence, 0.0);
    assert!(suggestion.matched_keywords.is_empty());
}

#[test]
fn test_more_matches_mean_strictly_higher_confidence() {
    let one = category_suggestion("plan the project");
    let many = category_suggestion("plan the project presentation for the client meeting");
    assert!(many.confidence > one.confidence);
}

#[test]
fn test_category_keywords_introspection() {
    let keywords = category_keywords();
    assert_eq!(keywords.len(), 3);
    let (label, words) = &keywords[0];
    assert_eq!(*label, Category::Work);
    // Declaration order is preserved for UI autocomplete.
    assert_eq!(words.first().map(String::as_str), Some("meeting"));
    assert!(words.contains(&"deadline".to_string()));
}

#[test]
fn test_priority_levels_from_keywords() {
    let parser = Parser::new();
    let reference = monday_noon_utc();

    let result = parser
        .parse_input("fix login bug asap", Some(reference), Some("UTC"))
        .unwrap();
    assert_eq!(result.priority, Some(Priority::High));
    assert_eq!(result.title, "fix login bug");

    let result = parser
        .parse_input("clean the garage whenever", Some(reference), Some("UTC"))
        .unwrap();
    assert_eq!(result.priority, Some(Priority::Low));

    let result = parser
        .parse_input("medium priority refactor", Some(reference), Some("UTC"))
        .unwrap();
    assert_eq!(result.priority, Some(Priority::Medium));
    assert_eq!(result.title, "refactor");
}

#[test]
fn test_config_overlay_extends_builtins() {
    let path = std::env::temp_dir().join("tasklex_overlay_test.toml");
    std::fs::write(
        &path,
        r#"
        [priority]
        high = ["blocker"]

        [category]
        work = ["sprint"]
        "#,
    )
    .unwrap();
    let config = KeywordConfig::load_from(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let parser = Parser::with_config(&config);
    let reference = monday_noon_utc();

    // The overlay keyword classifies...
    let result = parser
        .parse_input("investigate the blocker", Some(reference), Some("UTC"))
        .unwrap();
    assert_eq!(result.priority, Some(Priority::High));

    let result = parser
        .parse_input("plan the sprint", Some(reference), Some("UTC"))
        .unwrap();
    assert_eq!(result.category, Some(Category::Work));

    // ...and the built-ins still do.
    let result = parser
        .parse_input("do it asap", Some(reference), Some("UTC"))
        .unwrap();
    assert_eq!(result.priority, Some(Priority::High));
}

#[test]
fn test_default_parser_ignores_overlay_vocabulary() {
    let result = tasklex::parse_input(
        "investigate the blocker",
        Some(monday_noon_utc()),
        Some("UTC"),
    )
    .unwrap();
    assert!(result.priority.is_none());
}
