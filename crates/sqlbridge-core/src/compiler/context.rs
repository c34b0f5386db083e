//! Compilation context: scoped state threaded through the recursive descent.
//!
//! The context is two parallel stacks. `scopes` tracks argument-scoped flags
//! (currently: whether compilation is inside an aggregate's argument list);
//! each scope also names the query it belongs to. `queries` holds the
//! queries under construction, innermost last: one entry for the top-level
//! statement plus one per subquery currently being lowered.
//!
//! Scope state must never leak: a flag set for one scope is visible only
//! until that scope is popped, and the pop happens on every exit path,
//! success or failure. Query-level state (the `aggregates` flag) is the
//! deliberate exception: it outlives the scope that set it, because it
//! describes the query, not the argument position.

use crate::error::CompileError;
use crate::sqlast::{Expr, RangeVar, SelectStmt, SortBy, Target};

/// Argument-scoped compilation flags. Copied from the parent on push.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    /// True while compiling the argument list (or filter) of an aggregate.
    pub(crate) in_aggregate_arg: bool,
    /// Index into the query stack of the query this scope compiles into.
    pub(crate) query: usize,
}

/// A query being assembled. Finalizes into [`SelectStmt`].
#[derive(Debug, Default)]
pub(crate) struct QueryScaffold {
    pub(crate) aggregates: bool,
    pub(crate) targets: Vec<Target>,
    pub(crate) from: Option<RangeVar>,
    pub(crate) filter: Option<Expr>,
    pub(crate) group_by: Vec<Expr>,
    pub(crate) having: Option<Expr>,
    pub(crate) order_by: Vec<SortBy>,
    pub(crate) limit: Option<Expr>,
    pub(crate) offset: Option<Expr>,
}

impl QueryScaffold {
    pub(crate) fn finish(self) -> SelectStmt {
        SelectStmt {
            targets: self.targets,
            from: self.from,
            filter: self.filter,
            group_by: self.group_by,
            having: self.having,
            order_by: self.order_by,
            limit: self.limit,
            offset: self.offset,
            aggregates: self.aggregates,
        }
    }
}

/// Per-compilation mutable state. One instance per top-level compile call;
/// never shared across compilations.
#[derive(Debug)]
pub(crate) struct CompileContext {
    scopes: Vec<Scope>,
    queries: Vec<QueryScaffold>,
}

impl CompileContext {
    /// A context rooted at a fresh top-level query scaffold.
    pub(crate) fn new() -> Self {
        Self {
            scopes: vec![Scope {
                in_aggregate_arg: false,
                query: 0,
            }],
            queries: vec![QueryScaffold::default()],
        }
    }

    fn current(&self) -> Scope {
        // Both stacks are non-empty from construction to `into_root`; every
        // push is paired with a pop on all exit paths.
        *self.scopes.last().expect("scope stack is never empty")
    }

    pub(crate) fn in_aggregate_arg(&self) -> bool {
        self.current().in_aggregate_arg
    }

    /// The scaffold of the query the current scope compiles into.
    pub(crate) fn current_query_mut(&mut self) -> &mut QueryScaffold {
        let index = self.current().query;
        &mut self.queries[index]
    }

    /// Marks the query under construction as containing aggregates.
    ///
    /// Query-scoped: survives the pop of the scope that called it, unlike
    /// `in_aggregate_arg`.
    pub(crate) fn mark_query_has_aggregates(&mut self) {
        self.current_query_mut().aggregates = true;
    }

    #[cfg(test)]
    pub(crate) fn query_has_aggregates(&self) -> bool {
        self.queries[self.current().query].aggregates
    }

    /// Runs `body` inside a new scope derived from the current one.
    ///
    /// `configure` adjusts the new scope's flags before `body` runs. The
    /// scope is popped after `body` returns, whether it succeeded or not, so
    /// sibling compilations never observe the adjusted flags.
    pub(crate) fn scoped<T>(
        &mut self,
        configure: impl FnOnce(&mut Scope),
        body: impl FnOnce(&mut CompileContext) -> Result<T, CompileError>,
    ) -> Result<T, CompileError> {
        let mut scope = self.current();
        configure(&mut scope);
        self.scopes.push(scope);
        let result = body(self);
        self.scopes.pop();
        result
    }

    /// Runs `body` with a fresh query scaffold as the current query.
    ///
    /// Used for subquery lowering: the new scope starts with
    /// `in_aggregate_arg` reset, since aggregate-argument position does not
    /// carry across a query boundary. Both the scope and the scaffold are
    /// popped unconditionally; the scaffold is returned alongside the body's
    /// result so the caller can finalize it.
    pub(crate) fn with_query<T>(
        &mut self,
        body: impl FnOnce(&mut CompileContext) -> Result<T, CompileError>,
    ) -> Result<(T, QueryScaffold), CompileError> {
        let query = self.queries.len();
        self.queries.push(QueryScaffold::default());
        self.scopes.push(Scope {
            in_aggregate_arg: false,
            query,
        });
        let result = body(self);
        self.scopes.pop();
        let scaffold = self.queries.pop().expect("query stack is never empty");
        Ok((result?, scaffold))
    }

    /// Consumes the context, yielding the top-level scaffold.
    pub(crate) fn into_root(mut self) -> QueryScaffold {
        debug_assert_eq!(self.queries.len(), 1, "unbalanced query stack");
        debug_assert_eq!(self.scopes.len(), 1, "unbalanced scope stack");
        self.queries.pop().expect("query stack is never empty")
    }
}
