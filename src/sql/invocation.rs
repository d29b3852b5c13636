//! Method invocation view over a call expression

use super::expr::Expr;
use crate::errors::{TranslateError, TranslateResult};

/// Immutable, normalized view of one function-call expression
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    method_name: String,
    parameters: Vec<Expr>,
    /// Table alias of the enclosing query
    query_as: Option<String>,
}

impl MethodInvocation {
    pub fn new(
        method_name: impl Into<String>,
        parameters: Vec<Expr>,
        query_as: Option<String>,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            parameters,
            query_as,
        }
    }

    /// Builds an invocation from a method-invoke node
    pub fn from_expr(expr: &Expr, query_as: Option<&str>) -> TranslateResult<Self> {
        let (name, args) = expr.as_method_invoke().ok_or_else(|| {
            TranslateError::shape(expr.to_string(), "expression is not a method invocation")
        })?;
        Ok(Self::new(name, args.to_vec(), query_as.map(str::to_string)))
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn parameters(&self) -> &[Expr] {
        &self.parameters
    }

    pub fn parameter(&self, index: usize) -> Option<&Expr> {
        self.parameters.get(index)
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn query_as(&self) -> Option<&str> {
        self.query_as.as_deref()
    }

    /// Case-insensitive membership of the method name in `names`
    pub fn is_method_of(&self, names: &[&str]) -> bool {
        names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(&self.method_name))
    }
}
