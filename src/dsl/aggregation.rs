//! Bucket aggregation artifacts

use serde::Serialize;
use serde_json::{json, Value};

/// One keyed bucket of a range aggregation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeBucket<T> {
    pub key: String,
    pub from: T,
    pub to: T,
}

/// Numeric range bucket aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct RangeAggregation {
    name: String,
    field: String,
    ranges: Vec<RangeBucket<f64>>,
}

impl RangeAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            ranges: Vec::new(),
        }
    }

    pub fn add_range(&mut self, key: impl Into<String>, from: f64, to: f64) {
        self.ranges.push(RangeBucket {
            key: key.into(),
            from,
            to,
        });
    }

    pub fn ranges(&self) -> &[RangeBucket<f64>] {
        &self.ranges
    }
}

/// Date range bucket aggregation; boundaries are ISO-8601 strings
#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeAggregation {
    name: String,
    field: String,
    ranges: Vec<RangeBucket<String>>,
}

impl DateRangeAggregation {
    pub fn new(name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            ranges: Vec::new(),
        }
    }

    pub fn add_range(
        &mut self,
        key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) {
        self.ranges.push(RangeBucket {
            key: key.into(),
            from: from.into(),
            to: to.into(),
        });
    }

    pub fn ranges(&self) -> &[RangeBucket<String>] {
        &self.ranges
    }
}

/// A backend aggregation produced by a method parser
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationBuilder {
    Range(RangeAggregation),
    DateRange(DateRangeAggregation),
}

impl AggregationBuilder {
    pub fn name(&self) -> &str {
        match self {
            AggregationBuilder::Range(agg) => &agg.name,
            AggregationBuilder::DateRange(agg) => &agg.name,
        }
    }

    pub fn field(&self) -> &str {
        match self {
            AggregationBuilder::Range(agg) => &agg.field,
            AggregationBuilder::DateRange(agg) => &agg.field,
        }
    }

    /// Backend aggregation type name
    pub fn type_name(&self) -> &'static str {
        match self {
            AggregationBuilder::Range(_) => "range",
            AggregationBuilder::DateRange(_) => "date_range",
        }
    }

    /// Bucket keys in insertion order
    pub fn bucket_keys(&self) -> Vec<&str> {
        match self {
            AggregationBuilder::Range(agg) => agg.ranges.iter().map(|r| r.key.as_str()).collect(),
            AggregationBuilder::DateRange(agg) => {
                agg.ranges.iter().map(|r| r.key.as_str()).collect()
            }
        }
    }

    /// Renders `{"<name>": {"<type>": {"field": ..., "ranges": [...]}}}`
    pub fn to_json(&self) -> Value {
        let ranges = match self {
            AggregationBuilder::Range(agg) => json!(agg.ranges),
            AggregationBuilder::DateRange(agg) => json!(agg.ranges),
        };
        json!({
            self.name(): {
                self.type_name(): {
                    "field": self.field(),
                    "ranges": ranges,
                }
            }
        })
    }
}

/// Aggregation artifact handed back to the query compiler
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationQuery {
    aggregation: AggregationBuilder,
}

impl AggregationQuery {
    pub fn new(aggregation: AggregationBuilder) -> Self {
        Self { aggregation }
    }

    pub fn aggregation(&self) -> &AggregationBuilder {
        &self.aggregation
    }

    pub fn to_json(&self) -> Value {
        self.aggregation.to_json()
    }
}
