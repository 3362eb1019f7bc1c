use std::collections::HashSet;

const WILDCARD: char = '*';

/// A single normalized highlight token.
///
/// `pattern` is trimmed and lower-cased. A leading `*` is kept so the
/// canonical form reads back exactly as configured (`*wyvern`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pattern: String,
}

impl Rule {
    /// Normalize a raw token. Returns `None` for tokens that are blank after trimming.
    pub fn new(token: &str) -> Option<Self> {
        let pattern = token.trim().to_lowercase();
        if pattern.is_empty() {
            return None;
        }
        Some(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_wildcard(&self) -> bool {
        self.pattern.starts_with(WILDCARD)
    }

    /// The part compared against names: the suffix for wildcards, the whole pattern otherwise.
    pub fn needle(&self) -> &str {
        self.pattern
            .strip_prefix(WILDCARD)
            .unwrap_or(&self.pattern)
    }
}

/// Ordered set of distinct rules, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Canonical tokens, e.g. `["goblin", "zulrah", "*wyvern"]`.
    pub fn tokens(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::pattern).collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Split on commas, trim, lower-case, drop blanks and duplicates.
pub fn parse(raw: &str) -> RuleSet {
    let mut seen = HashSet::new();
    let rules = raw
        .split(',')
        .filter_map(Rule::new)
        .filter(|rule| seen.insert(rule.pattern.clone()))
        .collect();
    RuleSet { rules }
}
