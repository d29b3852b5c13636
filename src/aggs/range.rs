//! Range aggregation parser
//!
//! `range(field, segment(from, to), ...)` / `range_agg(...)`
//!
//! Produces a numeric `range` or a `date_range` bucket aggregation named
//! `<prefix><field>_range`, one bucket per segment in source order.

use std::fmt::Write;

use super::segment::{RangeSegment, SegmentBound, SegmentType};
use crate::config::TranslatorConfig;
use crate::dsl::{AggregationBuilder, AggregationQuery, DateRangeAggregation, RangeAggregation};
use crate::errors::{TranslateError, TranslateResult};
use crate::field::{FieldClassifier, QueryFieldType};
use crate::method::{MethodOutput, MethodParser};
use crate::sql::{Expr, MethodInvocation, SqlArg};

const AGG_RANGE_METHOD: &[&str] = &["range", "range_agg"];
const SEGMENT_METHOD: &str = "segment";

/// Parser for range bucket aggregations
#[derive(Debug, Clone)]
pub struct RangeAggParser {
    classifier: FieldClassifier,
    bucket_key_prefix: String,
    date_key_format: String,
}

impl Default for RangeAggParser {
    fn default() -> Self {
        Self::from_config(&TranslatorConfig::default())
    }
}

impl RangeAggParser {
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self {
            classifier: FieldClassifier::from_config(config),
            bucket_key_prefix: config.bucket_key_prefix.clone(),
            date_key_format: config.date_key_format.clone(),
        }
    }

    /// Returns the `(from, to)` arguments of a `segment(...)` call
    fn segment_args<'a>(method: &str, expr: &'a Expr) -> TranslateResult<(&'a Expr, &'a Expr)> {
        match expr.as_method_invoke() {
            Some((name, args)) if name.eq_ignore_ascii_case(SEGMENT_METHOD) => match args {
                [from, to] => Ok((from, to)),
                _ => Err(TranslateError::arity(name, args.len())),
            },
            _ => Err(TranslateError::shape(
                method,
                format!("expected a segment(from, to) argument, got [{}]", expr),
            )),
        }
    }

    fn parse_segments(&self, invocation: &MethodInvocation) -> TranslateResult<Vec<RangeSegment>> {
        let method = invocation.method_name();
        invocation.parameters()[1..]
            .iter()
            .map(|expr| {
                let (from, to) = Self::segment_args(method, expr)?;
                Ok(RangeSegment::new(
                    SegmentBound::from_arg(SqlArg::from_expr(SEGMENT_METHOD, from)?),
                    SegmentBound::from_arg(SqlArg::from_expr(SEGMENT_METHOD, to)?),
                ))
            })
            .collect()
    }

    /// Decides the aggregation kind from the first segment and checks that
    /// every bound of every segment agrees with it.
    fn segment_type(method: &str, segments: &[RangeSegment]) -> TranslateResult<SegmentType> {
        let first = segments
            .first()
            .ok_or_else(|| TranslateError::arity(method, 1))?;

        let kind = first.segment_type().ok_or_else(|| {
            TranslateError::shape(
                method,
                format!(
                    "range boundary [{}] is neither a number nor an ISO-8601 date-time",
                    first.from
                ),
            )
        })?;

        for segment in segments {
            for bound in [&segment.from, &segment.to] {
                if bound.segment_type() != Some(kind) {
                    return Err(TranslateError::shape(
                        method,
                        format!("range boundary [{}] does not match {} segments", bound, kind),
                    ));
                }
            }
        }

        Ok(kind)
    }

    fn format_date_key(&self, bound: &SegmentBound) -> TranslateResult<String> {
        let SegmentBound::Date { instant, .. } = bound else {
            return Err(TranslateError::syntax(format!("[{}] is not a date boundary", bound)));
        };
        let mut key = String::new();
        write!(key, "{}", instant.format(&self.date_key_format)).map_err(|_| {
            TranslateError::syntax(format!("invalid date key format [{}]", self.date_key_format))
        })?;
        Ok(key)
    }

    fn numeric_value(bound: &SegmentBound) -> TranslateResult<f64> {
        match bound {
            SegmentBound::Numeric { value, .. } => Ok(*value),
            other => Err(TranslateError::syntax(format!("[{}] is not a numeric boundary", other))),
        }
    }

    fn build(
        &self,
        field_name: &str,
        kind: SegmentType,
        segments: &[RangeSegment],
    ) -> TranslateResult<AggregationBuilder> {
        let agg_name = format!("{}{}_range", self.bucket_key_prefix, field_name);

        match kind {
            SegmentType::Numeric => {
                let mut agg = RangeAggregation::new(agg_name, field_name);
                for segment in segments {
                    let key = format!("{}-{}", segment.from, segment.to);
                    agg.add_range(
                        key,
                        Self::numeric_value(&segment.from)?,
                        Self::numeric_value(&segment.to)?,
                    );
                }
                Ok(AggregationBuilder::Range(agg))
            }
            SegmentType::Date => {
                let mut agg = DateRangeAggregation::new(agg_name, field_name);
                for segment in segments {
                    let key = format!(
                        "[{}]-[{}]",
                        self.format_date_key(&segment.from)?,
                        self.format_date_key(&segment.to)?
                    );
                    agg.add_range(key, segment.from.to_string(), segment.to.to_string());
                }
                Ok(AggregationBuilder::DateRange(agg))
            }
        }
    }
}

impl MethodParser for RangeAggParser {
    fn defined_names(&self) -> &'static [&'static str] {
        AGG_RANGE_METHOD
    }

    fn validate(&self, invocation: &MethodInvocation) -> TranslateResult<()> {
        let method = invocation.method_name();
        let params = invocation.parameters();

        if params.len() < 2 {
            return Err(TranslateError::arity(method, params.len()));
        }

        if !params[0].is_field_ref() {
            return Err(TranslateError::shape(
                method,
                format!("first argument must be a field, got [{}]", params[0]),
            ));
        }

        for expr in &params[1..] {
            Self::segment_args(method, expr)?;
        }

        Ok(())
    }

    fn parse(&self, invocation: &MethodInvocation) -> TranslateResult<MethodOutput> {
        let method = invocation.method_name();
        let field_expr = invocation
            .parameter(0)
            .ok_or_else(|| TranslateError::arity(method, 0))?;

        let field = self.classifier.classify(field_expr, invocation.query_as())?;
        match field.field_type() {
            QueryFieldType::RootDocField | QueryFieldType::InnerDocField => {}
            QueryFieldType::NestedDocField => {
                return Err(TranslateError::syntax(format!(
                    "can not aggregate nested array field [{}] directly",
                    field.full_name()
                )));
            }
        }

        let segments = self.parse_segments(invocation)?;
        let kind = Self::segment_type(method, &segments)?;
        let aggregation = self.build(field.full_name(), kind, &segments)?;

        Ok(MethodOutput::Aggregation(AggregationQuery::new(aggregation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(from: Expr, to: Expr) -> Expr {
        Expr::call("segment", vec![from, to])
    }

    fn range(args: Vec<Expr>) -> MethodInvocation {
        MethodInvocation::new("range", args, Some("t".into()))
    }

    fn parse_agg(inv: &MethodInvocation) -> TranslateResult<AggregationBuilder> {
        let parser = RangeAggParser::default();
        parser.validate(inv)?;
        Ok(parser
            .parse(inv)?
            .as_aggregation()
            .expect("aggregation output")
            .aggregation()
            .clone())
    }

    #[test]
    fn test_numeric_range() {
        let inv = range(vec![
            Expr::ident("price"),
            segment(Expr::int(0), Expr::int(100)),
            segment(Expr::int(100), Expr::int(200)),
        ]);

        let agg = parse_agg(&inv).unwrap();
        assert_eq!(agg.name(), "agg_price_range");
        assert_eq!(agg.field(), "price");
        assert_eq!(agg.bucket_keys(), vec!["0-100", "100-200"]);
        match agg {
            AggregationBuilder::Range(range) => {
                assert_eq!(range.ranges()[1].from, 100.0);
                assert_eq!(range.ranges()[1].to, 200.0);
            }
            other => panic!("expected numeric range, got {:?}", other),
        }
    }

    #[test]
    fn test_decimal_bounds_key() {
        let inv = range(vec![
            Expr::ident("score"),
            segment(Expr::number(0.5), Expr::number(1.5)),
        ]);
        assert_eq!(parse_agg(&inv).unwrap().bucket_keys(), vec!["0.5-1.5"]);
    }

    #[test]
    fn test_date_range() {
        let inv = range(vec![
            Expr::ident("createdAt"),
            segment(
                Expr::string("2020-01-01T00:00:00Z"),
                Expr::string("2020-02-01T00:00:00Z"),
            ),
        ]);

        let agg = parse_agg(&inv).unwrap();
        assert_eq!(agg.type_name(), "date_range");
        assert_eq!(
            agg.bucket_keys(),
            vec!["[2020-01-01 00:00:00]-[2020-02-01 00:00:00]"]
        );
        match agg {
            AggregationBuilder::DateRange(range) => {
                assert_eq!(range.ranges()[0].from, "2020-01-01T00:00:00Z");
                assert_eq!(range.ranges()[0].to, "2020-02-01T00:00:00Z");
            }
            other => panic!("expected date range, got {:?}", other),
        }
    }

    #[test]
    fn test_date_key_uses_literal_offset() {
        let inv = range(vec![
            Expr::ident("ts"),
            segment(
                Expr::string("2020-01-01T08:30:00+08:00"),
                Expr::string("2020-01-02T08:30:00+08:00"),
            ),
        ]);
        assert_eq!(
            parse_agg(&inv).unwrap().bucket_keys(),
            vec!["[2020-01-01 08:30:00]-[2020-01-02 08:30:00]"]
        );
    }

    #[test]
    fn test_inner_field_name() {
        let inv = range(vec![
            Expr::path("t.stats.views"),
            segment(Expr::int(0), Expr::int(10)),
        ]);
        let agg = parse_agg(&inv).unwrap();
        assert_eq!(agg.name(), "agg_stats.views_range");
        assert_eq!(agg.field(), "stats.views");
    }

    #[test]
    fn test_nested_field_rejected() {
        let inv = range(vec![
            Expr::path("$items.price"),
            segment(Expr::int(0), Expr::int(10)),
        ]);
        let err = parse_agg(&inv).unwrap_err();
        assert_eq!(err.code(), "SQLDSL_SYNTAX");
        assert!(err.to_string().contains("items.price"));
    }

    #[test]
    fn test_too_few_params() {
        let err = parse_agg(&range(vec![Expr::ident("price")])).unwrap_err();
        assert_eq!(err, TranslateError::arity("range", 1));
    }

    #[test]
    fn test_segment_wrong_arity() {
        let inv = range(vec![
            Expr::ident("price"),
            Expr::call("segment", vec![Expr::int(0)]),
        ]);
        let err = parse_agg(&inv).unwrap_err();
        assert_eq!(err, TranslateError::arity("segment", 1));
    }

    #[test]
    fn test_non_segment_argument() {
        let inv = range(vec![Expr::ident("price"), Expr::int(5)]);
        assert_eq!(parse_agg(&inv).unwrap_err().code(), "SQLDSL_INVOCATION_SHAPE");

        let inv = range(vec![
            Expr::ident("price"),
            Expr::call("between", vec![Expr::int(0), Expr::int(1)]),
        ]);
        assert_eq!(parse_agg(&inv).unwrap_err().code(), "SQLDSL_INVOCATION_SHAPE");
    }

    #[test]
    fn test_literal_field_rejected() {
        let inv = range(vec![Expr::int(1), segment(Expr::int(0), Expr::int(1))]);
        assert_eq!(parse_agg(&inv).unwrap_err().code(), "SQLDSL_INVOCATION_SHAPE");
    }

    #[test]
    fn test_mixed_segments_rejected() {
        let inv = range(vec![
            Expr::ident("price"),
            segment(Expr::int(0), Expr::int(100)),
            segment(
                Expr::string("2020-01-01T00:00:00Z"),
                Expr::string("2020-02-01T00:00:00Z"),
            ),
        ]);
        let err = parse_agg(&inv).unwrap_err();
        assert_eq!(err.code(), "SQLDSL_INVOCATION_SHAPE");
    }

    #[test]
    fn test_mixed_bounds_within_segment_rejected() {
        let inv = range(vec![
            Expr::ident("price"),
            segment(Expr::int(0), Expr::string("2020-01-01T00:00:00Z")),
        ]);
        assert!(parse_agg(&inv).is_err());
    }

    #[test]
    fn test_text_bounds_rejected() {
        let inv = range(vec![
            Expr::ident("price"),
            segment(Expr::string("low"), Expr::string("high")),
        ]);
        let err = parse_agg(&inv).unwrap_err();
        assert!(err.to_string().contains("low"));
    }

    #[test]
    fn test_custom_prefix_and_format() {
        let config = TranslatorConfig {
            bucket_key_prefix: "bucket_".into(),
            date_key_format: "%Y/%m/%d".into(),
            ..TranslatorConfig::default()
        };
        let parser = RangeAggParser::from_config(&config);
        let inv = range(vec![
            Expr::ident("day"),
            segment(
                Expr::string("2021-03-04T00:00:00Z"),
                Expr::string("2021-03-05T00:00:00Z"),
            ),
        ]);

        let output = parser.parse(&inv).unwrap();
        let agg = output.as_aggregation().unwrap().aggregation();
        assert_eq!(agg.name(), "bucket_day_range");
        assert_eq!(agg.bucket_keys(), vec!["[2021/03/04]-[2021/03/05]"]);
    }

    #[test]
    fn test_range_agg_alias() {
        let parser = RangeAggParser::default();
        assert!(parser.matches(&MethodInvocation::new("range_agg", vec![], None)));
        assert!(!parser.matches(&MethodInvocation::new("segment", vec![], None)));
    }
}
