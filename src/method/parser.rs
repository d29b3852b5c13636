//! Method parser contract

use serde_json::Value;

use crate::dsl::{AggregationQuery, AtomicQuery};
use crate::errors::TranslateResult;
use crate::sql::MethodInvocation;

/// Artifact produced by a successful parse
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutput {
    Query(AtomicQuery),
    Aggregation(AggregationQuery),
}

impl MethodOutput {
    pub fn as_query(&self) -> Option<&AtomicQuery> {
        match self {
            MethodOutput::Query(query) => Some(query),
            MethodOutput::Aggregation(_) => None,
        }
    }

    pub fn as_aggregation(&self) -> Option<&AggregationQuery> {
        match self {
            MethodOutput::Aggregation(agg) => Some(agg),
            MethodOutput::Query(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            MethodOutput::Query(query) => query.to_json(),
            MethodOutput::Aggregation(agg) => agg.to_json(),
        }
    }
}

/// A handler for one group of method names.
///
/// Implementations hold no per-call state; one instance serves any number of
/// concurrent translations.
pub trait MethodParser: Send + Sync {
    /// Method names (and aliases) owned by this parser
    fn defined_names(&self) -> &'static [&'static str];

    /// Returns true if this parser owns the invocation's method name
    fn matches(&self, invocation: &MethodInvocation) -> bool {
        invocation.is_method_of(self.defined_names())
    }

    /// Checks arity and argument shape; always called before `parse`
    fn validate(&self, invocation: &MethodInvocation) -> TranslateResult<()>;

    /// Produces the backend artifact for a validated invocation
    fn parse(&self, invocation: &MethodInvocation) -> TranslateResult<MethodOutput>;
}
