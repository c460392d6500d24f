//! Rule selection policies.

use ledgermap_model::Fact;

use crate::rule::MappingRule;

/// How the engine picks the rule(s) applied to one fact.
///
/// Both variants walk the rule list in prioritized order and always yield a
/// list, so the engine treats them uniformly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RuleResolution {
    /// Stop at the first matching rule. A fact matching none is unmapped.
    #[default]
    FirstMatch,
    /// Apply every matching rule. Zero matches is a valid outcome, not an
    /// unmapped fact.
    AllMatch,
}

impl RuleResolution {
    /// Selects the applicable rules for `fact`. `None` signals a fact that
    /// found no rule under [`RuleResolution::FirstMatch`].
    #[must_use]
    pub fn resolve<'r>(&self, rules: &'r [MappingRule], fact: &Fact) -> Option<Vec<&'r MappingRule>> {
        match self {
            Self::FirstMatch => rules
                .iter()
                .find(|rule| rule.matches_fact(fact))
                .map(|rule| vec![rule]),
            Self::AllMatch => Some(rules.iter().filter(|rule| rule.matches_fact(fact)).collect()),
        }
    }
}
