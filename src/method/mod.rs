//! Method invocation dispatch
//!
//! A [`MethodParserRegistry`] maps each recognized method name to one
//! [`MethodParser`]. Dispatch selects the owning parser, validates the
//! invocation, then parses it into a [`MethodOutput`].
//!
//! ```ignore
//! let registry = MethodParserRegistry::with_defaults(&TranslatorConfig::default())?;
//! let inv = MethodInvocation::from_expr(&expr, Some("t"))?;
//! let output = registry.dispatch(&inv)?;
//! ```

mod highlight;
pub mod params;
mod parser;
mod registry;

pub use highlight::HighlighterParser;
pub use params::{looks_like_parameter_string, ParamValue, ParameterizedMethod};
pub use parser::{MethodOutput, MethodParser};
pub use registry::MethodParserRegistry;
