// Highlight rules derived from the comma-separated "NPCs to highlight" field.
//
// Architecture:
// - parser.rs: Turns the raw field into an ordered, deduplicated RuleSet
// - matcher.rs: Case-insensitive exact and suffix-wildcard name matching

pub mod matcher;
pub mod parser;

pub use matcher::{first_match, matches};
pub use parser::{parse, Rule, RuleSet};
