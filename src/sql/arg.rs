//! Literal argument conversion
//!
//! Turns literal expression nodes into loosely-typed scalars that handlers
//! interpret further.

use super::expr::Expr;
use crate::errors::{TranslateError, TranslateResult};

/// A literal argument value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Integer(i64),
    Number(f64),
    Text(String),
    Boolean(bool),
    Null,
}

impl SqlArg {
    /// Converts a literal expression.
    ///
    /// Field references and nested calls are not literals and are rejected
    /// with a shape error attributed to `method`.
    pub fn from_expr(method: &str, expr: &Expr) -> TranslateResult<Self> {
        match expr {
            Expr::Integer { value } => Ok(SqlArg::Integer(*value)),
            Expr::Number { value } => Ok(SqlArg::Number(*value)),
            Expr::Char { value } => Ok(SqlArg::Text(value.clone())),
            Expr::Boolean { value } => Ok(SqlArg::Boolean(*value)),
            Expr::Null => Ok(SqlArg::Null),
            other => Err(TranslateError::shape(
                method,
                format!("expected a literal argument, got [{}]", other),
            )),
        }
    }

}

/// Reads a string literal argument, trimming surrounding whitespace
pub fn string_arg(method: &str, expr: &Expr) -> TranslateResult<String> {
    match SqlArg::from_expr(method, expr)? {
        SqlArg::Text(s) => Ok(s.trim().to_string()),
        other => Err(TranslateError::shape(
            method,
            format!("expected a string argument, got [{:?}]", other),
        )),
    }
}
