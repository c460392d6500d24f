//! Batch mapping: resolve, transform, aggregate.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

use tracing::debug;

use ledgermap_model::Fact;

use crate::context::MappingContext;
use crate::error::MappingError;
use crate::rule::{DimensionSpec, MappingRule};

/// The outcome of one mapping batch.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingResult {
    /// Aggregated facts, one per distinct target dimension set, in
    /// first-occurrence order.
    pub facts: Vec<Fact>,
    /// Input facts that matched no rule under first-match resolution.
    pub unmapped: Vec<Fact>,
}

impl MappingResult {
    /// True when every relevant input fact found a rule.
    #[must_use]
    pub fn is_exhaustive(&self) -> bool {
        self.unmapped.is_empty()
    }
}

/// Applies an ordered rule set to batches of facts.
///
/// The rule list is prioritized once at construction and read-only
/// afterwards; nothing engine-local is written during [`MappingEngine::execute`],
/// so one engine may serve concurrent batches.
#[derive(Debug, Clone)]
pub struct MappingEngine {
    context: MappingContext,
    rules: Vec<MappingRule>,
}

impl MappingEngine {
    #[must_use]
    pub fn new(context: MappingContext, mut rules: Vec<MappingRule>) -> Self {
        if let Some(prioritization) = &context.prioritization {
            rules.sort_by(|left, right| prioritization(left, right));
        }
        Self { context, rules }
    }

    /// An engine with the default context: first-match resolution over the
    /// rules in declaration order.
    #[must_use]
    pub fn with_rules(rules: Vec<MappingRule>) -> Self {
        Self::new(MappingContext::default(), rules)
    }

    /// The rules in prioritized order.
    #[must_use]
    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// Maps a batch of facts.
    ///
    /// Facts without dimensions are dropped on the way in and on the way
    /// out. A fact that matches no rule under first-match resolution goes to
    /// [`MappingResult::unmapped`] and the batch continues; transform and
    /// aggregation failures abort the whole call, since they indicate a
    /// broken rule table rather than one odd record.
    pub fn execute(&self, facts: &[Fact]) -> Result<MappingResult, MappingError> {
        let start = Instant::now();
        let mut unmapped = Vec::new();
        let mut transformed = Vec::new();

        for fact in facts.iter().filter(|fact| fact.has_dimensions()) {
            let Some(applicable) = self.context.resolution.resolve(&self.rules, fact) else {
                unmapped.push(fact.clone());
                continue;
            };
            for rule in applicable {
                let produced = rule.transform(fact)?;
                if produced.has_dimensions() {
                    transformed.push(produced);
                }
            }
        }

        let aggregated = aggregate(transformed)?;

        debug!(
            input_facts = facts.len(),
            rule_count = self.rules.len(),
            output_facts = aggregated.len(),
            unmapped_facts = unmapped.len(),
            duration_ms = start.elapsed().as_millis(),
            "mapping complete"
        );

        Ok(MappingResult {
            facts: aggregated,
            unmapped,
        })
    }

    /// The rules a partial query selects, in prioritized order. This is the
    /// introspection surface ("which rule applies to account X").
    #[must_use]
    pub fn find_rules_by_source(&self, request: &DimensionSpec) -> Vec<&MappingRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches_request(request))
            .collect()
    }
}

/// Folds facts sharing a dimension set into one fact per set, keeping the
/// sets in first-occurrence order and folding left-to-right within each.
fn aggregate(transformed: Vec<Fact>) -> Result<Vec<Fact>, MappingError> {
    let mut slot_by_dimensions: HashMap<BTreeMap<String, String>, usize> = HashMap::new();
    let mut aggregated: Vec<Fact> = Vec::new();
    for fact in transformed {
        match slot_by_dimensions.get(&fact.dimensions) {
            Some(&slot) => {
                aggregated[slot] = aggregated[slot].merge(&fact)?;
            }
            None => {
                slot_by_dimensions.insert(fact.dimensions.clone(), aggregated.len());
                aggregated.push(fact);
            }
        }
    }
    Ok(aggregated)
}
