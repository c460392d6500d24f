//! Engine configuration: resolution strategy and rule prioritization.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::matcher::DimPattern;
use crate::rule::MappingRule;
use crate::strategy::RuleResolution;

/// A total order over rules, applied once before resolution. Must be a
/// strict weak ordering for the stable sort to be well defined.
pub type RulePriority = Arc<dyn Fn(&MappingRule, &MappingRule) -> Ordering + Send + Sync>;

/// Configuration bundle handed to a [`MappingEngine`](crate::MappingEngine).
#[derive(Clone, Default)]
pub struct MappingContext {
    pub resolution: RuleResolution,
    pub prioritization: Option<RulePriority>,
}

impl MappingContext {
    #[must_use]
    pub fn new(resolution: RuleResolution) -> Self {
        Self {
            resolution,
            prioritization: None,
        }
    }

    /// Installs a rule ordering, applied once at engine construction.
    #[must_use]
    pub fn with_prioritization(mut self, prioritization: RulePriority) -> Self {
        self.prioritization = Some(prioritization);
        self
    }
}

impl fmt::Debug for MappingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingContext")
            .field("resolution", &self.resolution)
            .field("prioritized", &self.prioritization.is_some())
            .finish()
    }
}

/// Orders rules so that those constraining `dimension` with a wildcard come
/// after specific ones: the usual arrangement for fallback rules under
/// [`RuleResolution::FirstMatch`].
#[must_use]
pub fn wildcards_last(dimension: &str) -> RulePriority {
    let dimension = dimension.to_string();
    Arc::new(move |left, right| {
        is_wildcard_on(left, &dimension).cmp(&is_wildcard_on(right, &dimension))
    })
}

/// Orders wildcard rules on `dimension` before specific ones, making the
/// wildcard shadow them under [`RuleResolution::FirstMatch`].
#[must_use]
pub fn wildcards_first(dimension: &str) -> RulePriority {
    let dimension = dimension.to_string();
    Arc::new(move |left, right| {
        is_wildcard_on(right, &dimension).cmp(&is_wildcard_on(left, &dimension))
    })
}

fn is_wildcard_on(rule: &MappingRule, dimension: &str) -> bool {
    rule.source_pattern(dimension)
        .is_some_and(DimPattern::is_wildcard)
}
