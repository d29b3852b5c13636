//! Range segments
//!
//! A segment is the `(from, to)` pair of one `segment(...)` call. Boundary
//! kinds are decided per value and checked for consistency by the range
//! parser before any aggregation is built.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::sql::SqlArg;

/// Kind of a range aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentType {
    Numeric,
    Date,
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentType::Numeric => write!(f, "numeric"),
            SegmentType::Date => write!(f, "date"),
        }
    }
}

/// One boundary value of a segment
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentBound {
    /// Number together with the literal text used for bucket keys
    Numeric { value: f64, literal: String },
    /// Zoned date-time together with the literal it was parsed from
    Date {
        instant: DateTime<FixedOffset>,
        literal: String,
    },
    /// Neither numeric nor a date-time
    Text(String),
}

impl SegmentBound {
    /// Numbers stay numeric; strings holding an ISO-8601 zoned date-time
    /// become dates; everything else is text.
    pub fn from_arg(arg: SqlArg) -> Self {
        match arg {
            SqlArg::Integer(n) => SegmentBound::Numeric {
                value: n as f64,
                literal: n.to_string(),
            },
            SqlArg::Number(n) => SegmentBound::Numeric {
                value: n,
                literal: n.to_string(),
            },
            SqlArg::Text(text) => {
                let literal = text.trim().to_string();
                match parse_zoned_date_time(&literal) {
                    Some(instant) => SegmentBound::Date { instant, literal },
                    None => SegmentBound::Text(literal),
                }
            }
            SqlArg::Boolean(b) => SegmentBound::Text(b.to_string()),
            SqlArg::Null => SegmentBound::Text("NULL".to_string()),
        }
    }

    /// Segment type this bound belongs to; None for text
    pub fn segment_type(&self) -> Option<SegmentType> {
        match self {
            SegmentBound::Numeric { .. } => Some(SegmentType::Numeric),
            SegmentBound::Date { .. } => Some(SegmentType::Date),
            SegmentBound::Text(_) => None,
        }
    }
}

impl fmt::Display for SegmentBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentBound::Numeric { literal, .. } | SegmentBound::Date { literal, .. } => {
                write!(f, "{}", literal)
            }
            SegmentBound::Text(text) => write!(f, "{}", text),
        }
    }
}

/// ISO-8601 forms RFC 3339 parsing does not cover (seconds omitted)
const ISO_MINUTE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%#z"];

/// Parses an ISO-8601 zoned date-time, also accepting a trailing
/// `[Region/Zone]` suffix
fn parse_zoned_date_time(text: &str) -> Option<DateTime<FixedOffset>> {
    let without_region = match text.find('[') {
        Some(idx) if text.ends_with(']') => &text[..idx],
        _ => text,
    };
    DateTime::parse_from_rfc3339(without_region).ok().or_else(|| {
        ISO_MINUTE_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(without_region, format).ok())
    })
}

/// The `(from, to)` pair of one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSegment {
    pub from: SegmentBound,
    pub to: SegmentBound,
}

impl RangeSegment {
    pub fn new(from: SegmentBound, to: SegmentBound) -> Self {
        Self { from, to }
    }

    /// Type of the segment, decided by its `from` bound
    pub fn segment_type(&self) -> Option<SegmentType> {
        self.from.segment_type()
    }
}
