//! AST query nodes.

use serde::Serialize;

use super::expr::{Expr, SortBy};

/// A compiled SELECT statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectStmt {
    pub targets: Vec<Target>,
    pub from: Option<RangeVar>,
    pub filter: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<SortBy>,
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,

    /// True when any expression belonging to this query compiled an
    /// aggregate call. Set through the compilation context; consumers use it
    /// to decide grouping treatment without re-walking the tree.
    pub aggregates: bool,
}

/// One output column of the statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub expr: Expr,
    /// Output label; `None` lets the dialect pick its default.
    pub name: Option<String>,
}

/// A base relation reference in FROM.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeVar {
    pub schema: Option<String>,
    pub name: String,
    pub alias: Option<String>,
}
