//! Field path classification
//!
//! Resolution order for a path with the query alias stripped:
//! 1. Leading nested marker (`$items.price`) → NestedDocField
//! 2. Remaining dot (`user.name`) → InnerDocField
//! 3. Otherwise → RootDocField

use std::fmt;

use crate::config::TranslatorConfig;
use crate::errors::{TranslateError, TranslateResult};
use crate::sql::Expr;

/// Storage shape of a document field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFieldType {
    /// Top-level scalar field
    RootDocField,
    /// Field of an object reached by a dot path
    InnerDocField,
    /// Field inside an array of nested objects
    NestedDocField,
}

impl QueryFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryFieldType::RootDocField => "RootDocField",
            QueryFieldType::InnerDocField => "InnerDocField",
            QueryFieldType::NestedDocField => "NestedDocField",
        }
    }
}

impl fmt::Display for QueryFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryField {
    field_type: QueryFieldType,
    full_name: String,
    /// Path of the nested object array; Some iff NestedDocField
    nested_path: Option<String>,
}

impl QueryField {
    pub fn field_type(&self) -> QueryFieldType {
        self.field_type
    }

    /// Fully-qualified backend field name
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn nested_path(&self) -> Option<&str> {
        self.nested_path.as_deref()
    }

    pub fn is_nested(&self) -> bool {
        self.field_type == QueryFieldType::NestedDocField
    }
}

/// Classifies field references by the dotted-path and nested-marker convention
#[derive(Debug, Clone)]
pub struct FieldClassifier {
    nested_marker: String,
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::from_config(&TranslatorConfig::default())
    }
}

impl FieldClassifier {
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self {
            nested_marker: config.nested_marker.clone(),
        }
    }

    /// Classifies `field_expr` relative to the query alias.
    ///
    /// Pure: the same inputs always produce the same field.
    pub fn classify(&self, field_expr: &Expr, query_as: Option<&str>) -> TranslateResult<QueryField> {
        let segments = field_expr.field_segments().ok_or_else(|| {
            TranslateError::field_resolution(field_expr.to_string(), "not a field reference")
        })?;
        let display = segments.join(".");

        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(TranslateError::field_resolution(display, "empty path segment"));
        }

        let path = match query_as.filter(|alias| !alias.is_empty()) {
            Some(alias) if segments[0] == alias => {
                if segments.len() == 1 {
                    return Err(TranslateError::field_resolution(
                        display,
                        "path names only the query alias",
                    ));
                }
                &segments[1..]
            }
            _ => &segments[..],
        };

        let marker = self.nested_marker.as_str();
        if path[1..].iter().any(|s| s.contains(marker))
            || path[0].match_indices(marker).any(|(idx, _)| idx != 0)
        {
            return Err(TranslateError::field_resolution(
                display,
                format!("nested marker [{}] must lead the path", marker),
            ));
        }

        if let Some(head) = path[0].strip_prefix(marker) {
            if head.is_empty() {
                return Err(TranslateError::field_resolution(
                    display,
                    format!("nested marker [{}] is not followed by a field", marker),
                ));
            }
            let mut names: Vec<&str> = Vec::with_capacity(path.len());
            names.push(head);
            names.extend(&path[1..]);

            let nested_path = if names.len() > 1 {
                names[..names.len() - 1].join(".")
            } else {
                head.to_string()
            };

            return Ok(QueryField {
                field_type: QueryFieldType::NestedDocField,
                full_name: names.join("."),
                nested_path: Some(nested_path),
            });
        }

        let field_type = if path.len() > 1 {
            QueryFieldType::InnerDocField
        } else {
            QueryFieldType::RootDocField
        };

        Ok(QueryField {
            field_type,
            full_name: path.join("."),
            nested_path: None,
        })
    }
}
