use super::parser::{Rule, RuleSet};

impl Rule {
    /// Test an already lower-cased name against this rule.
    fn matches_folded(&self, folded_name: &str) -> bool {
        if self.is_wildcard() {
            folded_name.ends_with(self.needle())
        } else {
            folded_name == self.needle()
        }
    }
}

/// First rule (in first-seen order) matching `name`, case-insensitively.
/// Nameless NPCs never match, not even a bare `*`.
pub fn first_match<'a>(name: &str, rules: &'a RuleSet) -> Option<&'a Rule> {
    if name.is_empty() {
        return None;
    }
    let folded = name.to_lowercase();
    rules.iter().find(|rule| rule.matches_folded(&folded))
}

pub fn matches(name: &str, rules: &RuleSet) -> bool {
    first_match(name, rules).is_some()
}
