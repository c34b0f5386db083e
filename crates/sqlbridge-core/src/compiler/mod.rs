//! The IR-to-AST compiler.
//!
//! `compile_expr` is the dispatch core: a single exhaustive match mapping
//! each IR expression kind to its handler. Handlers recurse back through
//! `compile_expr` for sub-expressions and read or write the
//! [`CompileContext`](context::CompileContext) as they go; the dispatch core
//! itself owns no domain logic beyond the recursion-depth guard.
//!
//! Compilation is synchronous, single-threaded and single-pass: one query is
//! one uninterrupted call stack, and emitted sequences preserve IR order
//! exactly.

pub(crate) mod context;
mod expr;
mod function;
mod query;

#[cfg(test)]
mod tests;

use crate::error::CompileError;
use crate::ir;
use crate::sqlast;
use self::context::CompileContext;
#[cfg(feature = "tracing")]
use tracing::debug;

/// Default recursion budget for expression trees.
///
/// Deep nesting is legitimate (generated queries), but unbounded recursion
/// on adversarial input would overflow the stack before it exhausted the
/// heap. Exceeding the budget is an ordinary compile failure.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for a single compilation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Maximum expression nesting depth before compilation fails with
    /// [`CompileError::TooDeeplyNested`].
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compiles a resolved query into a target-dialect SELECT statement.
pub fn compile_query(input: &ir::SelectQuery) -> Result<sqlast::SelectStmt, CompileError> {
    compile_query_with_options(input, &CompileOptions::default())
}

/// [`compile_query`] with explicit options.
pub fn compile_query_with_options(
    input: &ir::SelectQuery,
    options: &CompileOptions,
) -> Result<sqlast::SelectStmt, CompileError> {
    let mut ctx = CompileContext::new();
    query::fill_select(&mut ctx, options, input, 0)?;
    Ok(ctx.into_root().finish())
}

/// Compiles a single detached expression.
///
/// The expression is lowered against a scratch query scaffold, so aggregate
/// calls compile normally; the scaffold itself is discarded. Intended for
/// callers that embed compiled fragments into their own statements.
pub fn compile_expression(input: &ir::Expr) -> Result<sqlast::Expr, CompileError> {
    compile_expression_with_options(input, &CompileOptions::default())
}

/// [`compile_expression`] with explicit options.
pub fn compile_expression_with_options(
    input: &ir::Expr,
    options: &CompileOptions,
) -> Result<sqlast::Expr, CompileError> {
    let mut ctx = CompileContext::new();
    compile_expr(&mut ctx, options, input, 0)
}

/// The dispatch core: one handler per IR kind, selected exhaustively.
pub(crate) fn compile_expr(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    input: &ir::Expr,
    depth: usize,
) -> Result<sqlast::Expr, CompileError> {
    if depth > options.max_depth {
        #[cfg(feature = "tracing")]
        debug!(depth, "expression depth limit exceeded");
        return Err(CompileError::TooDeeplyNested {
            limit: options.max_depth,
        });
    }
    let next = depth + 1;

    match input {
        ir::Expr::Literal { value } => Ok(sqlast::Expr::Literal(expr::lower_literal(value))),
        ir::Expr::Param { index } => Ok(sqlast::Expr::Param(*index)),
        ir::Expr::Column { table, name } => Ok(sqlast::Expr::ColumnRef(sqlast::ColumnRef {
            table: table.clone(),
            name: name.clone(),
        })),
        ir::Expr::Unary { op, operand } => expr::compile_unary(ctx, options, *op, operand, next),
        ir::Expr::Binary { op, left, right } => {
            expr::compile_binary(ctx, options, *op, left, right, next)
        }
        ir::Expr::IsNull { operand, negated } => {
            let operand = compile_expr(ctx, options, operand, next)?;
            Ok(sqlast::Expr::NullTest {
                operand: Box::new(operand),
                negated: *negated,
            })
        }
        ir::Expr::Case {
            subject,
            branches,
            otherwise,
        } => expr::compile_case(ctx, options, subject.as_deref(), branches, otherwise.as_deref(), next),
        ir::Expr::Cast { operand, type_name } => {
            let operand = compile_expr(ctx, options, operand, next)?;
            Ok(sqlast::Expr::Cast {
                operand: Box::new(operand),
                type_name: type_name.clone(),
            })
        }
        ir::Expr::FunctionCall(call) => function::compile_function_call(ctx, options, call, next),
        ir::Expr::Exists { query, negated } => {
            let stmt = query::lower_subquery(ctx, options, query, next)?;
            Ok(sqlast::Expr::SubLink(sqlast::SubLink::Exists {
                negated: *negated,
                query: Box::new(stmt),
            }))
        }
        ir::Expr::Subquery { query } => {
            let stmt = query::lower_subquery(ctx, options, query, next)?;
            Ok(sqlast::Expr::SubLink(sqlast::SubLink::Scalar {
                query: Box::new(stmt),
            }))
        }
    }
}
