//! sqldsl - SQL method calls to search-backend DSL
//!
//! Recognizes pseudo-function calls such as `range(price, segment(0, 100))`
//! or `highlight(title, 'fragment_size:150')` inside parsed SQL, validates
//! them and emits the equivalent backend aggregation or query clause.

pub mod aggs;
pub mod config;
pub mod dsl;
pub mod errors;
pub mod field;
pub mod method;
pub mod observability;
pub mod sql;

pub use config::{ConfigError, TranslatorConfig};
pub use errors::{TranslateError, TranslateResult};
pub use method::{MethodOutput, MethodParser, MethodParserRegistry};
pub use sql::{Expr, MethodInvocation};
