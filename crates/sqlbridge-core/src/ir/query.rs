//! IR query node hosting expression trees.
//!
//! The resolver emits one `SelectQuery` per (sub)query. The compiler lowers
//! it clause by clause through the dispatch core; subquery expression kinds
//! recurse back into query lowering with a fresh query scaffold.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::expr::{Expr, SortSpec};

/// A resolved SELECT-shaped query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectQuery {
    /// Output expressions in declaration order. Never empty.
    pub projection: Vec<Projection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Relation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Expr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<Expr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl SelectQuery {
    /// A query projecting the given expressions, with no other clauses.
    pub fn projecting(exprs: Vec<Expr>) -> Self {
        Self {
            projection: exprs.into_iter().map(Projection::unnamed).collect(),
            from: None,
            filter: None,
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn with_from(mut self, relation: Relation) -> Self {
        self.from = Some(relation);
        self
    }

    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// One output column of a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub expr: Expr,

    /// Output name chosen by the user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Projection {
    pub fn unnamed(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn named(expr: Expr, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }
}

/// A base relation in the FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Relation {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}
