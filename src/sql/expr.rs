//! SQL expression tree handed over by the grammar parser
//!
//! Only the node kinds that method invocations can carry are modelled here.
//! The tree is read-only for the translator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed SQL expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Bare identifier: `price`
    Identifier { name: String },
    /// Dotted reference: `owner.name`
    Property { owner: Box<Expr>, name: String },
    /// Integer literal
    Integer { value: i64 },
    /// Decimal literal
    Number { value: f64 },
    /// Quoted string literal
    Char { value: String },
    /// Boolean literal
    Boolean { value: bool },
    /// NULL
    Null,
    /// Function-call shaped expression: `name(args...)`
    MethodInvoke { name: String, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    /// Builds a dotted reference from `a.b.c` style text.
    ///
    /// Segments are taken verbatim, so an empty segment stays empty.
    pub fn path(path: &str) -> Self {
        let mut segments = path.split('.');
        let head = segments.next().unwrap_or_default();
        segments.fold(Expr::ident(head), |owner, name| Expr::Property {
            owner: Box::new(owner),
            name: name.to_string(),
        })
    }

    pub fn int(value: i64) -> Self {
        Expr::Integer { value }
    }

    pub fn number(value: f64) -> Self {
        Expr::Number { value }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Char {
            value: value.into(),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodInvoke {
            name: name.into(),
            args,
        }
    }

    /// Returns true for identifier and property references
    pub fn is_field_ref(&self) -> bool {
        matches!(self, Expr::Identifier { .. } | Expr::Property { .. })
    }

    /// Flattens a field reference into its dotted segments.
    ///
    /// Returns None for anything that is not a field reference.
    pub fn field_segments(&self) -> Option<Vec<&str>> {
        match self {
            Expr::Identifier { name } => Some(vec![name.as_str()]),
            Expr::Property { owner, name } => {
                let mut segments = owner.field_segments()?;
                segments.push(name.as_str());
                Some(segments)
            }
            _ => None,
        }
    }

    /// Returns the call name and arguments of a method-invoke node
    pub fn as_method_invoke(&self) -> Option<(&str, &[Expr])> {
        match self {
            Expr::MethodInvoke { name, args } => Some((name.as_str(), args.as_slice())),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier { name } => write!(f, "{}", name),
            Expr::Property { owner, name } => write!(f, "{}.{}", owner, name),
            Expr::Integer { value } => write!(f, "{}", value),
            Expr::Number { value } => write!(f, "{}", value),
            Expr::Char { value } => write!(f, "'{}'", value),
            Expr::Boolean { value } => write!(f, "{}", value),
            Expr::Null => write!(f, "NULL"),
            Expr::MethodInvoke { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
