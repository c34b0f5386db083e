//! Handlers for the simple expression kinds: operators, CASE, constants and
//! sort keys. Each one compiles children in IR order through the dispatch
//! core and maps enums across the IR/AST boundary with exhaustive matches.

use super::context::CompileContext;
use super::{compile_expr, CompileOptions};
use crate::error::CompileError;
use crate::ir;
use crate::sqlast;

pub(crate) fn lower_literal(value: &ir::Literal) -> sqlast::Literal {
    match value {
        ir::Literal::Null => sqlast::Literal::Null,
        ir::Literal::Boolean(b) => sqlast::Literal::Boolean(*b),
        ir::Literal::Integer(i) => sqlast::Literal::Integer(*i),
        ir::Literal::Float(f) => sqlast::Literal::Float(*f),
        ir::Literal::String(s) => sqlast::Literal::String(s.clone()),
    }
}

fn lower_unary_op(op: ir::UnaryOp) -> sqlast::UnaryOp {
    match op {
        ir::UnaryOp::Not => sqlast::UnaryOp::Not,
        ir::UnaryOp::Minus => sqlast::UnaryOp::Minus,
    }
}

fn lower_binary_op(op: ir::BinaryOp) -> sqlast::BinaryOp {
    match op {
        ir::BinaryOp::And => sqlast::BinaryOp::And,
        ir::BinaryOp::Or => sqlast::BinaryOp::Or,
        ir::BinaryOp::Eq => sqlast::BinaryOp::Eq,
        ir::BinaryOp::NotEq => sqlast::BinaryOp::NotEq,
        ir::BinaryOp::Lt => sqlast::BinaryOp::Lt,
        ir::BinaryOp::LtEq => sqlast::BinaryOp::LtEq,
        ir::BinaryOp::Gt => sqlast::BinaryOp::Gt,
        ir::BinaryOp::GtEq => sqlast::BinaryOp::GtEq,
        ir::BinaryOp::Add => sqlast::BinaryOp::Add,
        ir::BinaryOp::Subtract => sqlast::BinaryOp::Subtract,
        ir::BinaryOp::Multiply => sqlast::BinaryOp::Multiply,
        ir::BinaryOp::Divide => sqlast::BinaryOp::Divide,
        ir::BinaryOp::Modulo => sqlast::BinaryOp::Modulo,
        ir::BinaryOp::Like => sqlast::BinaryOp::Like,
        ir::BinaryOp::ILike => sqlast::BinaryOp::ILike,
        ir::BinaryOp::Concat => sqlast::BinaryOp::Concat,
    }
}

pub(crate) fn compile_unary(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    op: ir::UnaryOp,
    operand: &ir::Expr,
    depth: usize,
) -> Result<sqlast::Expr, CompileError> {
    let operand = compile_expr(ctx, options, operand, depth)?;
    Ok(sqlast::Expr::Unary {
        op: lower_unary_op(op),
        operand: Box::new(operand),
    })
}

pub(crate) fn compile_binary(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    op: ir::BinaryOp,
    left: &ir::Expr,
    right: &ir::Expr,
    depth: usize,
) -> Result<sqlast::Expr, CompileError> {
    let left = compile_expr(ctx, options, left, depth)?;
    let right = compile_expr(ctx, options, right, depth)?;
    Ok(sqlast::Expr::Binary {
        op: lower_binary_op(op),
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub(crate) fn compile_case(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    subject: Option<&ir::Expr>,
    branches: &[ir::CaseBranch],
    otherwise: Option<&ir::Expr>,
    depth: usize,
) -> Result<sqlast::Expr, CompileError> {
    if branches.is_empty() {
        return Err(CompileError::Malformed("CASE with no branches".into()));
    }

    let subject = subject
        .map(|s| compile_expr(ctx, options, s, depth))
        .transpose()?;
    let mut compiled = Vec::with_capacity(branches.len());
    for branch in branches {
        compiled.push(sqlast::CaseBranch {
            condition: compile_expr(ctx, options, &branch.condition, depth)?,
            result: compile_expr(ctx, options, &branch.result, depth)?,
        });
    }
    let otherwise = otherwise
        .map(|e| compile_expr(ctx, options, e, depth))
        .transpose()?;

    Ok(sqlast::Expr::Case(sqlast::CaseExpr {
        subject: subject.map(Box::new),
        branches: compiled,
        otherwise: otherwise.map(Box::new),
    }))
}

/// Lowers one IR sort spec into a target sort key.
///
/// Sort expressions are ordinary expressions: no scope change, whatever the
/// caller's current scope happens to be. Direction and null placement are
/// carried verbatim.
pub(crate) fn lower_sort_spec(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    spec: &ir::SortSpec,
    depth: usize,
) -> Result<sqlast::SortBy, CompileError> {
    Ok(sqlast::SortBy {
        expr: compile_expr(ctx, options, &spec.expr, depth)?,
        direction: match spec.direction {
            ir::SortDirection::Asc => sqlast::SortDirection::Asc,
            ir::SortDirection::Desc => sqlast::SortDirection::Desc,
        },
        nulls: spec.nulls.map(|nulls| match nulls {
            ir::NullsOrder::First => sqlast::NullsOrder::First,
            ir::NullsOrder::Last => sqlast::NullsOrder::Last,
        }),
    })
}
