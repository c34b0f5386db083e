//! Resolver-facing query IR.
//!
//! The IR is the language-agnostic expression tree handed to the compiler by
//! the upstream resolver. It arrives fully resolved: argument counts and
//! types are already checked, and every function call carries its catalog
//! metadata. The compiler treats the whole tree as read-only input.

mod catalog;
mod expr;
mod query;

pub use catalog::FunctionRef;
pub use expr::{
    BinaryOp, CaseBranch, Expr, FunctionCall, Literal, NullsOrder, SortDirection, SortSpec,
    UnaryOp,
};
pub use query::{Projection, Relation, SelectQuery};
