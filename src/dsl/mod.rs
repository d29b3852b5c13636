//! Backend DSL artifacts
//!
//! Output boundary of the translator. Each successful parse yields exactly
//! one artifact, which renders to the search backend's JSON request syntax.

mod aggregation;
mod query;

pub use aggregation::{
    AggregationBuilder, AggregationQuery, DateRangeAggregation, RangeAggregation, RangeBucket,
};
pub use query::{AtomicQuery, HighlightField};
