//! Target-dialect SQL AST.
//!
//! The compiler produces these trees; the renderer serializes them to query
//! text. The model is deliberately independent of the IR: the two sides of
//! the compiler evolve separately, and the invariants documented here are
//! guarantees about compiler *output*, checked by tests against the renderer
//! contract.

mod expr;
mod query;

pub use expr::{
    BinaryOp, CaseBranch, CaseExpr, ColumnRef, Expr, FuncCall, Literal, NullsOrder, SortBy,
    SortDirection, SubLink, UnaryOp, WindowDef,
};
pub use query::{RangeVar, SelectStmt, Target};
