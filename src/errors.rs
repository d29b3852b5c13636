//! Translation error types
//!
//! Every failure is raised while compiling a single method invocation and is
//! terminal for it. Error codes:
//! - SQLDSL_INVOCATION_ARITY
//! - SQLDSL_INVOCATION_SHAPE
//! - SQLDSL_UNKNOWN_METHOD
//! - SQLDSL_DUPLICATE_METHOD
//! - SQLDSL_UNSUPPORTED_FIELD_TYPE
//! - SQLDSL_MALFORMED_PARAMS
//! - SQLDSL_FIELD_RESOLUTION
//! - SQLDSL_SYNTAX

use thiserror::Error;

use crate::field::QueryFieldType;

/// Result type for translation operations
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Errors raised while translating a method invocation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    /// Wrong number of parameters for a method
    #[error("[syntax error] There's no {count} args method named [{method}]")]
    InvocationArity { method: String, count: usize },

    /// Parameter present but not of the expected sub-expression shape
    #[error("[syntax error] Method [{method}]: {reason}")]
    InvocationShape { method: String, reason: String },

    /// No registered parser claims the method name
    #[error("[syntax error] Unknown method [{0}]")]
    UnknownMethod(String),

    /// Two parsers claim the same method name
    #[error("Method name [{0}] is already owned by another parser")]
    DuplicateMethod(String),

    /// The resolved field kind cannot be used by the method
    #[error("[syntax error] Can not support {method} for field type [{field_type}]")]
    UnsupportedFieldType {
        method: String,
        field_type: QueryFieldType,
    },

    /// Extra-parameter string does not match `key:value,...`
    #[error("Failed to parse query method extra param string at [{0}]")]
    MalformedParameterString(String),

    /// Field path cannot be resolved against the query alias
    #[error("[syntax error] Can not resolve field [{field}]: {reason}")]
    FieldResolution { field: String, reason: String },

    /// Structurally valid input the translator refuses
    #[error("[syntax error] {0}")]
    Syntax(String),
}

impl TranslateError {
    /// Create an arity error
    pub fn arity(method: impl Into<String>, count: usize) -> Self {
        Self::InvocationArity {
            method: method.into(),
            count,
        }
    }

    /// Create a shape error
    pub fn shape(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvocationShape {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Create a field resolution error
    pub fn field_resolution(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FieldResolution {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a syntax error
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvocationArity { .. } => "SQLDSL_INVOCATION_ARITY",
            Self::InvocationShape { .. } => "SQLDSL_INVOCATION_SHAPE",
            Self::UnknownMethod(_) => "SQLDSL_UNKNOWN_METHOD",
            Self::DuplicateMethod(_) => "SQLDSL_DUPLICATE_METHOD",
            Self::UnsupportedFieldType { .. } => "SQLDSL_UNSUPPORTED_FIELD_TYPE",
            Self::MalformedParameterString(_) => "SQLDSL_MALFORMED_PARAMS",
            Self::FieldResolution { .. } => "SQLDSL_FIELD_RESOLUTION",
            Self::Syntax(_) => "SQLDSL_SYNTAX",
        }
    }

    /// Returns the method name the error refers to, if any
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::InvocationArity { method, .. }
            | Self::InvocationShape { method, .. }
            | Self::UnsupportedFieldType { method, .. } => Some(method.as_str()),
            Self::UnknownMethod(name) | Self::DuplicateMethod(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TranslateError::arity("range", 1).code(), "SQLDSL_INVOCATION_ARITY");
        assert_eq!(
            TranslateError::UnknownMethod("foo".into()).code(),
            "SQLDSL_UNKNOWN_METHOD"
        );
        assert_eq!(
            TranslateError::MalformedParameterString("b".into()).code(),
            "SQLDSL_MALFORMED_PARAMS"
        );
    }

    #[test]
    fn test_arity_display_names_count_and_method() {
        let err = TranslateError::arity("highlight", 3);
        assert_eq!(
            err.to_string(),
            "[syntax error] There's no 3 args method named [highlight]"
        );
    }

    #[test]
    fn test_unsupported_field_type_display() {
        let err = TranslateError::UnsupportedFieldType {
            method: "range".into(),
            field_type: QueryFieldType::NestedDocField,
        };
        assert!(err.to_string().contains("NestedDocField"));
        assert_eq!(err.method(), Some("range"));
    }

    #[test]
    fn test_method_accessor() {
        assert_eq!(TranslateError::UnknownMethod("x".into()).method(), Some("x"));
        assert_eq!(TranslateError::syntax("boom").method(), None);
    }
}
