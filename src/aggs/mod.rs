//! Aggregation method parsers

mod range;
mod segment;

pub use range::RangeAggParser;
pub use segment::{RangeSegment, SegmentBound, SegmentType};
