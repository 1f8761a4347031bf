// Crate root library declaration and module exports.
pub mod config;
pub mod extract;
pub mod model;
pub mod parser;
pub mod pattern;
pub mod timeparse;

pub use config::KeywordConfig;
pub use extract::category::{keywords as category_keywords, suggestion as category_suggestion};
pub use extract::disambiguation::generate_suggestions as generate_disambiguation_suggestions;
pub use model::{
    AmbiguityKind, AmbiguousElement, Category, CategorySuggestion, DateSuggestion,
    ExtractionResult, ParseResult, Priority,
};
pub use parser::{Parser, parse_input};
