//! IR expression tree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::catalog::FunctionRef;
use super::query::SelectQuery;

/// One node of the resolver-produced expression tree.
///
/// The set of kinds is closed: the dispatch core matches exhaustively over
/// it, so adding a variant forces every handler site to be revisited at
/// compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expr {
    /// A constant value.
    Literal { value: Literal },
    /// A positional query parameter, 1-based as assigned by the resolver.
    Param { index: u32 },
    /// A column reference, optionally qualified with a relation name.
    Column {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table: Option<String>,
        name: String,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `NULL` test, rendered postfix in the target dialect.
    IsNull {
        operand: Box<Expr>,
        #[serde(default)]
        negated: bool,
    },
    /// Searched or simple CASE. `subject` present means the simple form.
    Case {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<Box<Expr>>,
        branches: Vec<CaseBranch>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        otherwise: Option<Box<Expr>>,
    },
    #[serde(rename_all = "camelCase")]
    Cast {
        operand: Box<Expr>,
        /// Target dialect type name, carried verbatim.
        type_name: String,
    },
    FunctionCall(FunctionCall),
    /// `EXISTS` test over a subquery.
    Exists {
        query: Box<SelectQuery>,
        #[serde(default)]
        negated: bool,
    },
    /// Scalar subquery producing a single value.
    Subquery { query: Box<SelectQuery> },
}

/// A constant in the IR. The compiler maps it verbatim into the AST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOp {
    Not,
    Minus,
}

/// Binary operators as the resolver names them; the compiler owns the
/// mapping to target-dialect operator symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
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

/// One branch of a CASE expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseBranch {
    pub condition: Expr,
    pub result: Expr,
}

/// A function or aggregate call, with the clauses the resolver attached.
///
/// When `window` is true the call is lowered with an OVER clause; when the
/// function is an aggregate and `window` is false it is a plain aggregate.
/// `partition_by` is meaningful only for window calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCall {
    pub function: FunctionRef,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Expr>,

    /// Aggregate filter (`FILTER (WHERE …)` in the target dialect).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Box<Expr>>,

    /// Ordering for the aggregate or window, per `window`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<SortSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partition_by: Vec<Expr>,

    #[serde(default)]
    pub window: bool,
}

impl FunctionCall {
    /// A bare call with arguments and no aggregate/window clauses.
    pub fn new(function: FunctionRef, args: Vec<Expr>) -> Self {
        Self {
            function,
            args,
            filter: None,
            order_by: Vec::new(),
            partition_by: Vec::new(),
            window: false,
        }
    }

    pub fn with_filter(mut self, filter: Expr) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn with_order_by(mut self, order_by: Vec<SortSpec>) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn with_partition_by(mut self, partition_by: Vec<Expr>) -> Self {
        self.partition_by = partition_by;
        self
    }

    pub fn over_window(mut self) -> Self {
        self.window = true;
        self
    }
}

/// A sort key: expression, direction and explicit null placement.
///
/// Compiles one-to-one into a target sort node; `nulls` left as `None`
/// defers to the dialect default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub expr: Expr,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nulls: Option<NullsOrder>,
}

impl SortSpec {
    pub fn ascending(expr: Expr) -> Self {
        Self {
            expr,
            direction: SortDirection::Asc,
            nulls: None,
        }
    }

    pub fn descending(expr: Expr) -> Self {
        Self {
            expr,
            direction: SortDirection::Desc,
            nulls: None,
        }
    }

    pub fn with_nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum NullsOrder {
    First,
    Last,
}

impl Expr {
    /// Convenience constructor for an unqualified column reference.
    pub fn column(name: impl Into<String>) -> Self {
        Expr::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Convenience constructor for a qualified column reference.
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    pub fn literal(value: Literal) -> Self {
        Expr::Literal { value }
    }

    pub fn integer(value: i64) -> Self {
        Expr::Literal {
            value: Literal::Integer(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::String(value.into()),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
