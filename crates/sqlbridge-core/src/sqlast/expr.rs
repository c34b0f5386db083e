//! AST expression nodes.

use serde::Serialize;

use super::query::SelectStmt;

/// One node of the target-dialect expression tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Expr {
    Literal(Literal),
    /// Positional parameter, rendered `$n`.
    Param(u32),
    ColumnRef(ColumnRef),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    NullTest {
        operand: Box<Expr>,
        negated: bool,
    },
    Case(CaseExpr),
    Cast {
        operand: Box<Expr>,
        type_name: String,
    },
    FuncCall(FuncCall),
    SubLink(SubLink),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub table: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOp {
    Not,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Like,
    ILike,
    Concat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseExpr {
    pub subject: Option<Box<Expr>>,
    pub branches: Vec<CaseBranch>,
    pub otherwise: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseBranch {
    pub condition: Expr,
    pub result: Expr,
}

/// A compiled function or aggregate call.
///
/// Ordering belongs to exactly one place: `agg_order` for a plain aggregate
/// (`agg(x ORDER BY k)`), or `over` for a window call. The compiler never
/// populates both, and the renderer relies on that.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FuncCall {
    /// Native function identifier, possibly schema-qualified.
    pub name: String,
    pub args: Vec<Expr>,
    /// ORDER BY inside the aggregate's argument parentheses.
    pub agg_order: Vec<SortBy>,
    pub agg_filter: Option<Box<Expr>>,
    pub over: Option<WindowDef>,
}

impl FuncCall {
    /// A call with arguments only.
    pub fn plain(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self {
            name: name.into(),
            args,
            agg_order: Vec::new(),
            agg_filter: None,
            over: None,
        }
    }
}

/// Window definition owned by the call that created it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowDef {
    pub partition: Vec<Expr>,
    pub order_by: Vec<SortBy>,
}

/// A sort key with direction and explicit null placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortBy {
    pub expr: Expr,
    pub direction: SortDirection,
    pub nulls: Option<NullsOrder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NullsOrder {
    First,
    Last,
}

/// A subquery embedded in an expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SubLink {
    Exists {
        negated: bool,
        query: Box<SelectStmt>,
    },
    Scalar {
        query: Box<SelectStmt>,
    },
}
