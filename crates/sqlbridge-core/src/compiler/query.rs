//! Query lowering: assembles a SELECT scaffold clause by clause, routing
//! every expression through the dispatch core.

use super::context::CompileContext;
use super::expr::lower_sort_spec;
use super::{compile_expr, CompileOptions};
use crate::error::CompileError;
use crate::ir;
use crate::sqlast;

/// Compiles `input` into the context's current query scaffold.
///
/// Clauses compile in a fixed order (projection, FROM, filter, GROUP BY,
/// HAVING, ORDER BY, LIMIT/OFFSET) and each clause's expressions compile in
/// IR order, which is preserved in the emitted sequences.
pub(crate) fn fill_select(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    input: &ir::SelectQuery,
    depth: usize,
) -> Result<(), CompileError> {
    if input.projection.is_empty() {
        return Err(CompileError::Malformed("query with empty projection".into()));
    }

    for (index, projection) in input.projection.iter().enumerate() {
        let compiled = compile_expr(ctx, options, &projection.expr, depth)?;
        let name = target_name(projection, index);
        ctx.current_query_mut().targets.push(sqlast::Target {
            expr: compiled,
            name,
        });
    }

    if let Some(relation) = &input.from {
        ctx.current_query_mut().from = Some(lower_relation(relation));
    }

    if let Some(filter) = &input.filter {
        let compiled = compile_expr(ctx, options, filter, depth)?;
        ctx.current_query_mut().filter = Some(compiled);
    }

    for group in &input.group_by {
        let compiled = compile_expr(ctx, options, group, depth)?;
        ctx.current_query_mut().group_by.push(compiled);
    }

    if let Some(having) = &input.having {
        let compiled = compile_expr(ctx, options, having, depth)?;
        ctx.current_query_mut().having = Some(compiled);
    }

    for spec in &input.order_by {
        let compiled = lower_sort_spec(ctx, options, spec, depth)?;
        ctx.current_query_mut().order_by.push(compiled);
    }

    if let Some(limit) = input.limit {
        ctx.current_query_mut().limit = Some(integer_expr(limit));
    }
    if let Some(offset) = input.offset {
        ctx.current_query_mut().offset = Some(integer_expr(offset));
    }

    Ok(())
}

/// Lowers a subquery with its own scaffold and scope.
///
/// The inner query tracks its own aggregates flag; nothing it does leaks
/// into the enclosing scaffold.
pub(crate) fn lower_subquery(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    input: &ir::SelectQuery,
    depth: usize,
) -> Result<sqlast::SelectStmt, CompileError> {
    let ((), scaffold) = ctx.with_query(|ctx| fill_select(ctx, options, input, depth))?;
    Ok(scaffold.finish())
}

/// Output label for a projection: the user's alias when present, a derived
/// label otherwise. Plain column references keep their own name and need no
/// explicit label.
fn target_name(projection: &ir::Projection, index: usize) -> Option<String> {
    if let Some(alias) = &projection.alias {
        return Some(alias.clone());
    }
    match &projection.expr {
        ir::Expr::Column { .. } => None,
        ir::Expr::FunctionCall(call) => Some(call.function.name.to_lowercase()),
        _ => Some(format!("column{}", index + 1)),
    }
}

fn lower_relation(relation: &ir::Relation) -> sqlast::RangeVar {
    sqlast::RangeVar {
        schema: relation.schema.clone(),
        name: relation.name.clone(),
        alias: relation.alias.clone(),
    }
}

fn integer_expr(value: u64) -> sqlast::Expr {
    sqlast::Expr::Literal(sqlast::Literal::Integer(value as i64))
}
