//! Mapping rules: a source dimension pattern paired with target producers.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ledgermap_model::{Fact, Value};

use crate::error::{MappingError, PatternError};
use crate::matcher::DimPattern;

/// Raw per-dimension pattern text, as authored. `None` means the dimension
/// must be absent or empty. Partial rule queries use the same shape.
pub type DimensionSpec = BTreeMap<String, Option<String>>;

/// Produces a target fact's values from the source fact.
pub type ValuesTransform =
    Arc<dyn Fn(&Fact) -> Result<BTreeMap<String, Value>, MappingError> + Send + Sync>;

/// Produces a target fact's dimensions from the source fact.
pub type DimensionsTransform = Arc<dyn Fn(&Fact) -> BTreeMap<String, String> + Send + Sync>;

/// The identity values transform: target values are the source values.
#[must_use]
pub fn passthrough_values() -> ValuesTransform {
    Arc::new(|fact: &Fact| Ok(fact.values.clone()))
}

#[derive(Clone)]
enum TargetDimensions {
    Literal(BTreeMap<String, String>),
    Derived(DimensionsTransform),
}

/// One mapping rule: which facts it consumes and what it produces for them.
///
/// Rules are immutable once built and cheap to clone (compiled patterns and
/// transforms are shared). With a literal target every transformed fact
/// lands on one canonical dimension set, which is what lets the engine
/// aggregate rule output.
#[derive(Clone)]
pub struct MappingRule {
    source: BTreeMap<String, DimPattern>,
    target: TargetDimensions,
    values: ValuesTransform,
}

impl MappingRule {
    /// Builds a rule with a fixed target dimension set.
    pub fn new(
        source: DimensionSpec,
        target: BTreeMap<String, String>,
        values: ValuesTransform,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            source: compile_source(source)?,
            target: TargetDimensions::Literal(target),
            values,
        })
    }

    /// Builds a rule whose target dimensions are derived from each source
    /// fact instead of fixed, for rules that carry source labels through.
    pub fn with_derived_target(
        source: DimensionSpec,
        target: DimensionsTransform,
        values: ValuesTransform,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            source: compile_source(source)?,
            target: TargetDimensions::Derived(target),
            values,
        })
    }

    /// The compiled pattern constraining `dimension`, if the rule has one.
    #[must_use]
    pub fn source_pattern(&self, dimension: &str) -> Option<&DimPattern> {
        self.source.get(dimension)
    }

    /// True when every dimension the rule constrains accepts the fact's
    /// value there. A rule constraining no dimension accepts every fact.
    #[must_use]
    pub fn matches_fact(&self, fact: &Fact) -> bool {
        self.source
            .iter()
            .all(|(dimension, pattern)| pattern.matches_value(fact.dimension(dimension)))
    }

    /// True when the rule matches a partial query. Only dimensions named on
    /// both sides are compared; a query sharing no dimension with the
    /// rule's source never matches, unlike the vacuous success of
    /// [`MappingRule::matches_fact`] on an unconstrained rule.
    #[must_use]
    pub fn matches_request(&self, request: &DimensionSpec) -> bool {
        let shared: Vec<(&String, &DimPattern)> = self
            .source
            .iter()
            .filter(|(dimension, _)| request.contains_key(dimension.as_str()))
            .collect();
        if shared.is_empty() {
            return false;
        }
        shared.iter().all(|(dimension, pattern)| {
            pattern.matches_request(request[dimension.as_str()].as_deref())
        })
    }

    /// Applies the rule to a fact, producing the target fact.
    pub fn transform(&self, fact: &Fact) -> Result<Fact, MappingError> {
        let dimensions = match &self.target {
            TargetDimensions::Literal(map) => map.clone(),
            TargetDimensions::Derived(derive) => derive(fact),
        };
        Ok(Fact::new(dimensions, (self.values)(fact)?))
    }
}

impl fmt::Debug for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source: BTreeMap<&str, Option<&str>> = self
            .source
            .iter()
            .map(|(dimension, pattern)| (dimension.as_str(), pattern.text()))
            .collect();
        let mut dbg = f.debug_struct("MappingRule");
        dbg.field("source", &source);
        match &self.target {
            TargetDimensions::Literal(map) => dbg.field("target", map),
            TargetDimensions::Derived(_) => dbg.field("target", &"<derived>"),
        };
        dbg.finish_non_exhaustive()
    }
}

fn compile_source(
    source: DimensionSpec,
) -> Result<BTreeMap<String, DimPattern>, PatternError> {
    source
        .into_iter()
        .map(|(dimension, raw)| Ok((dimension, DimPattern::parse(raw.as_deref())?)))
        .collect()
}
