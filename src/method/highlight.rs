//! Highlighter method parser
//!
//! Forms:
//! - `highlight(field, 'k:v,...')`
//! - `highlight(field, pre_tag, post_tag, 'k:v,...')`

use super::params::ParameterizedMethod;
use super::parser::{MethodOutput, MethodParser};
use crate::config::TranslatorConfig;
use crate::dsl::{AtomicQuery, HighlightField};
use crate::errors::{TranslateError, TranslateResult};
use crate::field::FieldClassifier;
use crate::sql::{string_arg, MethodInvocation};

const HIGHLIGHT_METHOD: &[&str] = &["highlight", "highlighter"];

/// Parser for `highlight` / `highlighter`
#[derive(Debug, Clone, Default)]
pub struct HighlighterParser {
    classifier: FieldClassifier,
}

impl HighlighterParser {
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self {
            classifier: FieldClassifier::from_config(config),
        }
    }
}

impl ParameterizedMethod for HighlighterParser {
    fn extra_param_string(&self, invocation: &MethodInvocation) -> TranslateResult<Option<String>> {
        match invocation.parameters().last() {
            Some(expr) if invocation.parameter_count() > 1 => {
                string_arg(invocation.method_name(), expr).map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl MethodParser for HighlighterParser {
    fn defined_names(&self) -> &'static [&'static str] {
        HIGHLIGHT_METHOD
    }

    fn validate(&self, invocation: &MethodInvocation) -> TranslateResult<()> {
        let count = invocation.parameter_count();
        if count != 2 && count != 4 {
            return Err(TranslateError::arity(invocation.method_name(), count));
        }
        Ok(())
    }

    fn parse(&self, invocation: &MethodInvocation) -> TranslateResult<MethodOutput> {
        let method = invocation.method_name();
        let params = invocation.parameters();

        let field_expr = params
            .first()
            .ok_or_else(|| TranslateError::arity(method, params.len()))?;
        let field = self.classifier.classify(field_expr, invocation.query_as())?;
        let mut highlight = HighlightField::new(field.full_name())
            .with_options(self.typed_parameter_map(invocation)?);

        if params.len() == 4 {
            let pre_tag = string_arg(method, &params[1])?;
            let post_tag = string_arg(method, &params[2])?;
            highlight = highlight.with_tags(pre_tag, post_tag);
        }

        Ok(MethodOutput::Query(AtomicQuery::highlight_only(highlight)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::Expr;

    fn invocation(args: Vec<Expr>) -> MethodInvocation {
        MethodInvocation::new("highlight", args, Some("t".into()))
    }

    #[test]
    fn test_accepts_two_and_four_args() {
        let parser = HighlighterParser::default();
        for count in [2, 4] {
            let args = (0..count).map(|_| Expr::string("a:1")).collect();
            assert!(parser.validate(&invocation(args)).is_ok());
        }
    }

    #[test]
    fn test_rejects_other_counts() {
        let parser = HighlighterParser::default();
        for count in [0, 1, 3, 5] {
            let args = (0..count).map(|_| Expr::string("a:1")).collect();
            let err = parser.validate(&invocation(args)).unwrap_err();
            assert_eq!(err, TranslateError::arity("highlight", count));
        }
    }

    #[test]
    fn test_matches_both_names() {
        let parser = HighlighterParser::default();
        assert!(parser.matches(&MethodInvocation::new("highlighter", vec![], None)));
        assert!(parser.matches(&MethodInvocation::new("HIGHLIGHT", vec![], None)));
        assert!(!parser.matches(&MethodInvocation::new("range", vec![], None)));
    }

    #[test]
    fn test_parse_with_options() {
        let parser = HighlighterParser::default();
        let inv = invocation(vec![
            Expr::path("t.title"),
            Expr::string("fragment_size:150,type:plain"),
        ]);

        let output = parser.parse(&inv).unwrap();
        let query = output.as_query().unwrap();
        let field = &query.highlighter()[0];
        assert_eq!(field.field, "title");
        assert!(field.pre_tags.is_empty());
        assert_eq!(field.options["fragment_size"].as_u64(), Some(150));
        assert_eq!(field.options["type"].as_str(), Some("plain"));
        assert!(query.query().is_none());
    }

    #[test]
    fn test_parse_with_tags() {
        let parser = HighlighterParser::default();
        let inv = invocation(vec![
            Expr::path("t.body.text"),
            Expr::string("<b>"),
            Expr::string("</b>"),
            Expr::string("number_of_fragments:3"),
        ]);

        let output = parser.parse(&inv).unwrap();
        let field = &output.as_query().unwrap().highlighter()[0];
        assert_eq!(field.field, "body.text");
        assert_eq!(field.pre_tags, vec!["<b>"]);
        assert_eq!(field.post_tags, vec!["</b>"]);
    }

    #[test]
    fn test_malformed_options_rejected() {
        let parser = HighlighterParser::default();
        let inv = invocation(vec![Expr::ident("title"), Expr::string("fragment_size")]);
        let err = parser.parse(&inv).unwrap_err();
        assert_eq!(err.code(), "SQLDSL_MALFORMED_PARAMS");
    }
}
