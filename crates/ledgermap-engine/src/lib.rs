#![deny(unsafe_code)]

//! Declarative mapping of dimensioned facts.
//!
//! The engine turns a batch of [`Fact`](ledgermap_model::Fact)s into a new
//! batch by matching each fact against an ordered set of [`MappingRule`]s,
//! applying the selected rule's target transforms, and folding every result
//! that lands on the same target dimension set into a single fact.
//!
//! - **matcher**: per-dimension wildcard/regex patterns
//! - **rule**: source pattern + target dimension/value producers, with two
//!   query surfaces (concrete fact, partial request)
//! - **strategy**: first-match vs all-match rule selection
//! - **context**: strategy + optional rule prioritization
//! - **engine**: the filter → resolve → transform → aggregate pipeline
//!
//! ```ignore
//! let context = MappingContext::default().with_prioritization(wildcards_last("ACC"));
//! let engine = MappingEngine::new(context, rules);
//! let result = engine.execute(&facts)?;
//! for fact in &result.unmapped {
//!     // no rule covered this fact; the mapped output is still in result.facts
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod rule;
pub mod strategy;

pub use context::{MappingContext, RulePriority, wildcards_first, wildcards_last};
pub use engine::{MappingEngine, MappingResult};
pub use error::{MappingError, PatternError};
pub use matcher::DimPattern;
pub use rule::{
    DimensionSpec, DimensionsTransform, MappingRule, ValuesTransform, passthrough_values,
};
pub use strategy::RuleResolution;
