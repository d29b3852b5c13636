//! # Method Parser Registry
//!
//! Build-once, read-many table of method parsers. Each method name is owned
//! by exactly one parser; duplicates are rejected at registration.

use std::collections::HashSet;

use super::highlight::HighlighterParser;
use super::parser::{MethodOutput, MethodParser};
use crate::aggs::RangeAggParser;
use crate::config::TranslatorConfig;
use crate::errors::{TranslateError, TranslateResult};
use crate::observability::{log_event_with_fields, Event};
use crate::sql::MethodInvocation;

/// Ordered collection of method parsers
#[derive(Default)]
pub struct MethodParserRegistry {
    parsers: Vec<Box<dyn MethodParser>>,
    /// Lowercased names owned by registered parsers
    owned_names: HashSet<String>,
}

impl MethodParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the range aggregation and highlighter parsers
    pub fn with_defaults(config: &TranslatorConfig) -> TranslateResult<Self> {
        let mut registry = Self::new();
        registry.register(Box::new(RangeAggParser::from_config(config)))?;
        registry.register(Box::new(HighlighterParser::from_config(config)))?;
        Ok(registry)
    }

    /// Register a parser.
    ///
    /// Fails without modifying the registry if any of its names is taken.
    pub fn register(&mut self, parser: Box<dyn MethodParser>) -> TranslateResult<()> {
        let names: Vec<String> = parser
            .defined_names()
            .iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();

        let mut seen = HashSet::new();
        for name in &names {
            if self.owned_names.contains(name) || !seen.insert(name.as_str()) {
                return Err(TranslateError::DuplicateMethod(name.clone()));
            }
        }

        let joined = names.join(",");
        log_event_with_fields(Event::ParserRegistered, &[("names", joined.as_str())]);

        self.owned_names.extend(names);
        self.parsers.push(parser);
        Ok(())
    }

    /// Find the first parser that matches the invocation
    pub fn find(&self, invocation: &MethodInvocation) -> Option<&dyn MethodParser> {
        self.parsers
            .iter()
            .find(|parser| parser.matches(invocation))
            .map(|parser| parser.as_ref())
    }

    /// Validate then parse the invocation with its owning parser
    pub fn dispatch(&self, invocation: &MethodInvocation) -> TranslateResult<MethodOutput> {
        let method = invocation.method_name();

        let Some(parser) = self.find(invocation) else {
            log_event_with_fields(Event::MethodUnknown, &[("method", method)]);
            return Err(TranslateError::UnknownMethod(method.to_string()));
        };

        let result = parser
            .validate(invocation)
            .and_then(|()| parser.parse(invocation));

        match &result {
            Ok(_) => {
                let count = invocation.parameter_count().to_string();
                log_event_with_fields(
                    Event::MethodDispatched,
                    &[("method", method), ("params", count.as_str())],
                );
            }
            Err(e) => {
                let reason = e.to_string();
                log_event_with_fields(
                    Event::MethodRejected,
                    &[("method", method), ("code", e.code()), ("reason", reason.as_str())],
                );
            }
        }

        result
    }

    /// All owned method names, sorted
    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.owned_names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered parsers
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::AtomicQuery;
    use crate::sql::Expr;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Records the order of validate/parse calls
    struct ProbeParser {
        names: &'static [&'static str],
        calls: Arc<AtomicUsize>,
        validated_first: Arc<AtomicUsize>,
    }

    impl MethodParser for ProbeParser {
        fn defined_names(&self) -> &'static [&'static str] {
            self.names
        }

        fn validate(&self, _invocation: &MethodInvocation) -> TranslateResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn parse(&self, _invocation: &MethodInvocation) -> TranslateResult<MethodOutput> {
            if self.calls.load(Ordering::SeqCst) == 1 {
                self.validated_first.fetch_add(1, Ordering::SeqCst);
            }
            Ok(MethodOutput::Query(AtomicQuery::new(json!({"match_all": {}}))))
        }
    }

    fn probe(names: &'static [&'static str]) -> (ProbeParser, Arc<AtomicUsize>) {
        let validated_first = Arc::new(AtomicUsize::new(0));
        (
            ProbeParser {
                names,
                calls: Arc::new(AtomicUsize::new(0)),
                validated_first: validated_first.clone(),
            },
            validated_first,
        )
    }

    #[test]
    fn test_validate_runs_before_parse() {
        let (parser, validated_first) = probe(&["probe"]);
        let mut registry = MethodParserRegistry::new();
        registry.register(Box::new(parser)).unwrap();

        let inv = MethodInvocation::new("probe", vec![Expr::ident("f")], None);
        registry.dispatch(&inv).unwrap();
        assert_eq!(validated_first.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_method() {
        let registry = MethodParserRegistry::with_defaults(&TranslatorConfig::default()).unwrap();
        let inv = MethodInvocation::new("term", vec![], None);

        let err = registry.dispatch(&inv).unwrap_err();
        assert_eq!(err, TranslateError::UnknownMethod("term".into()));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = MethodParserRegistry::new();
        registry.register(Box::new(probe(&["a", "b"]).0)).unwrap();

        let err = registry.register(Box::new(probe(&["c", "B"]).0)).unwrap_err();
        assert_eq!(err, TranslateError::DuplicateMethod("b".into()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.method_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_within_one_parser_rejected() {
        let mut registry = MethodParserRegistry::new();
        assert!(registry.register(Box::new(probe(&["x", "X"]).0)).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_defaults_own_range_and_highlight() {
        let registry = MethodParserRegistry::with_defaults(&TranslatorConfig::default()).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.method_names(),
            vec!["highlight", "highlighter", "range", "range_agg"]
        );
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MethodParserRegistry>();
    }
}
