//! SQL input boundary
//!
//! The grammar parser produces [`Expr`] trees; the translator wraps every
//! recognized call site in a [`MethodInvocation`].

mod arg;
mod expr;
mod invocation;

pub use arg::{string_arg, SqlArg};
pub use expr::Expr;
pub use invocation::MethodInvocation;
