//! Field classification subsystem
//!
//! Resolves field references against the document schema convention:
//! dotted paths address inner object fields and a reserved marker token
//! addresses fields inside arrays of nested objects. No schema service is
//! consulted.

mod classifier;

pub use classifier::{FieldClassifier, QueryField, QueryFieldType};
