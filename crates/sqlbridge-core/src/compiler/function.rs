//! Function-call lowering: aggregate scoping, sort and partition clauses,
//! and the placement decision between aggregate-internal ordering and window
//! ordering.

use super::context::CompileContext;
use super::expr::lower_sort_spec;
use super::{compile_expr, CompileOptions};
use crate::error::CompileError;
use crate::ir;
use crate::sqlast;
#[cfg(feature = "tracing")]
use tracing::debug;

/// How a call is assembled, decided once up front from the IR flags.
///
/// Ordering computed from the call's sort specs belongs to exactly one
/// place: the window definition for `Windowed`, the call's own argument
/// parentheses otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallShape {
    /// Ordinary function call; sort specs, if any, stay on the call.
    Scalar,
    /// Aggregate without an OVER clause.
    PlainAggregate,
    /// Call carrying an OVER clause, aggregate or not.
    Windowed,
}

impl CallShape {
    fn of(call: &ir::FunctionCall) -> Self {
        if call.window {
            CallShape::Windowed
        } else if call.function.aggregate {
            CallShape::PlainAggregate
        } else {
            CallShape::Scalar
        }
    }
}

/// Compiles one IR function call into a target `FuncCall` node.
///
/// Aggregate calls compile their argument list (and filter) inside a scope
/// with `in_aggregate_arg` set, and mark the enclosing query as containing
/// aggregates; the scope closes before the sort and partition clauses, which
/// are ordinary expressions. The native name comes solely from the catalog
/// mapping; a function without one fails the whole compilation.
pub(crate) fn compile_function_call(
    ctx: &mut CompileContext,
    options: &CompileOptions,
    call: &ir::FunctionCall,
    depth: usize,
) -> Result<sqlast::Expr, CompileError> {
    let shape = CallShape::of(call);

    // The resolver never emits an aggregate directly inside another
    // aggregate's argument list; seeing one here means the input is broken.
    if call.function.aggregate && ctx.in_aggregate_arg() {
        return Err(CompileError::Malformed(format!(
            "aggregate {} nested inside an aggregate argument",
            call.function.name
        )));
    }

    let (args, agg_filter) = if call.function.aggregate {
        ctx.scoped(
            |scope| scope.in_aggregate_arg = true,
            |ctx| {
                ctx.mark_query_has_aggregates();
                let args = call
                    .args
                    .iter()
                    .map(|arg| compile_expr(ctx, options, arg, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                let filter = call
                    .filter
                    .as_deref()
                    .map(|f| compile_expr(ctx, options, f, depth))
                    .transpose()?;
                Ok((args, filter))
            },
        )?
    } else {
        let args = call
            .args
            .iter()
            .map(|arg| compile_expr(ctx, options, arg, depth))
            .collect::<Result<Vec<_>, _>>()?;
        (args, None)
    };

    let mut sort_keys = Vec::with_capacity(call.order_by.len());
    for spec in &call.order_by {
        sort_keys.push(lower_sort_spec(ctx, options, spec, depth)?);
    }

    // Partition expressions are always compiled (so nested subqueries and
    // aggregates behave uniformly) but only a window consumes them.
    let mut partition = Vec::with_capacity(call.partition_by.len());
    for part in &call.partition_by {
        partition.push(compile_expr(ctx, options, part, depth)?);
    }

    let Some(native) = call.function.native.as_deref() else {
        #[cfg(feature = "tracing")]
        debug!(function = %call.function.name, "no native mapping for function");
        return Err(CompileError::UnsupportedFunction {
            name: call.function.name.clone(),
        });
    };

    let node = match shape {
        CallShape::Windowed => sqlast::FuncCall {
            name: native.to_owned(),
            args,
            agg_order: Vec::new(),
            agg_filter: agg_filter.map(Box::new),
            over: Some(sqlast::WindowDef {
                partition,
                order_by: sort_keys,
            }),
        },
        CallShape::PlainAggregate | CallShape::Scalar => sqlast::FuncCall {
            name: native.to_owned(),
            args,
            agg_order: sort_keys,
            agg_filter: agg_filter.map(Box::new),
            over: None,
        },
    };

    Ok(sqlast::Expr::FuncCall(node))
}
