//! SQL text rendering for the target AST.
//!
//! Rendering is a pure function of the tree: no context, no failure modes.
//! Identifiers are always double-quoted (embedded quotes doubled), string
//! literals single-quoted likewise, and an operator binding-strength table
//! drives minimal parenthesization so the emitted text re-parses to the same
//! shape.

use crate::sqlast::{
    BinaryOp, CaseExpr, ColumnRef, Expr, FuncCall, Literal, NullsOrder, RangeVar, SelectStmt,
    SortBy, SortDirection, SubLink, UnaryOp, WindowDef,
};

/// Renders a SELECT statement to a single-line SQL string.
pub fn to_sql(stmt: &SelectStmt) -> String {
    let mut out = String::new();
    write_select(&mut out, stmt);
    out
}

/// Renders a standalone expression to SQL text.
pub fn expr_to_sql(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr, 0);
    out
}

/// Binding strength, loosest to tightest. A sub-expression is parenthesized
/// when its strength is below what its position requires.
fn strength(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary { op, .. } => binary_strength(*op),
        Expr::Unary { op, .. } => match op {
            UnaryOp::Not => 30,
            UnaryOp::Minus => 110,
        },
        Expr::NullTest { .. } => 40,
        // Self-delimiting forms never need outer parentheses.
        Expr::Literal(_)
        | Expr::Param(_)
        | Expr::ColumnRef(_)
        | Expr::Case(_)
        | Expr::Cast { .. }
        | Expr::FuncCall(_)
        | Expr::SubLink(_) => u8::MAX,
    }
}

fn binary_strength(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 10,
        BinaryOp::And => 20,
        BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => 50,
        BinaryOp::Like | BinaryOp::ILike => 60,
        BinaryOp::Concat => 70,
        BinaryOp::Add | BinaryOp::Subtract => 80,
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo => 90,
    }
}

fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::And => "AND",
        BinaryOp::Or => "OR",
        BinaryOp::Eq => "=",
        BinaryOp::NotEq => "<>",
        BinaryOp::Lt => "<",
        BinaryOp::LtEq => "<=",
        BinaryOp::Gt => ">",
        BinaryOp::GtEq => ">=",
        BinaryOp::Add => "+",
        BinaryOp::Subtract => "-",
        BinaryOp::Multiply => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
        BinaryOp::Like => "LIKE",
        BinaryOp::ILike => "ILIKE",
        BinaryOp::Concat => "||",
    }
}

fn write_expr(out: &mut String, expr: &Expr, min_strength: u8) {
    let own = strength(expr);
    let parenthesize = own < min_strength;
    if parenthesize {
        out.push('(');
    }

    match expr {
        Expr::Literal(literal) => write_literal(out, literal),
        Expr::Param(index) => {
            out.push('$');
            out.push_str(&index.to_string());
        }
        Expr::ColumnRef(column) => write_column(out, column),
        Expr::Unary { op, operand } => {
            match op {
                UnaryOp::Not => out.push_str("NOT "),
                // A space is not enough here: `--` would start a comment.
                UnaryOp::Minus => out.push('-'),
            }
            write_expr(out, operand, own.saturating_add(1));
        }
        Expr::Binary { op, left, right } => {
            write_expr(out, left, own);
            out.push(' ');
            out.push_str(binary_symbol(*op));
            out.push(' ');
            write_expr(out, right, own.saturating_add(1));
        }
        Expr::NullTest { operand, negated } => {
            write_expr(out, operand, own.saturating_add(1));
            out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
        }
        Expr::Case(case) => write_case(out, case),
        Expr::Cast { operand, type_name } => {
            out.push_str("CAST(");
            write_expr(out, operand, 0);
            out.push_str(" AS ");
            out.push_str(type_name);
            out.push(')');
        }
        Expr::FuncCall(call) => write_func_call(out, call),
        Expr::SubLink(sublink) => write_sublink(out, sublink),
    }

    if parenthesize {
        out.push(')');
    }
}

fn write_literal(out: &mut String, literal: &Literal) {
    match literal {
        Literal::Null => out.push_str("NULL"),
        Literal::Boolean(true) => out.push_str("TRUE"),
        Literal::Boolean(false) => out.push_str("FALSE"),
        Literal::Integer(value) => out.push_str(&value.to_string()),
        // Debug formatting keeps the decimal point, so `1.0` stays a float
        // after a round trip through the parser.
        Literal::Float(value) => out.push_str(&format!("{value:?}")),
        Literal::String(value) => write_string_literal(out, value),
    }
}

fn write_string_literal(out: &mut String, value: &str) {
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}

/// Always-quoted identifier with embedded quotes doubled.
fn write_ident(out: &mut String, ident: &str) {
    out.push('"');
    for ch in ident.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

fn write_column(out: &mut String, column: &ColumnRef) {
    if let Some(table) = &column.table {
        write_ident(out, table);
        out.push('.');
    }
    write_ident(out, &column.name);
}

/// Function names arrive as native identifiers, possibly schema-qualified;
/// each dot-separated part is quoted on its own.
fn write_func_name(out: &mut String, name: &str) {
    for (i, part) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        write_ident(out, part);
    }
}

fn write_func_call(out: &mut String, call: &FuncCall) {
    write_func_name(out, &call.name);
    out.push('(');
    for (i, arg) in call.args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, arg, 0);
    }
    if !call.agg_order.is_empty() {
        if !call.args.is_empty() {
            out.push(' ');
        }
        out.push_str("ORDER BY ");
        write_sort_list(out, &call.agg_order);
    }
    out.push(')');

    if let Some(filter) = &call.agg_filter {
        out.push_str(" FILTER (WHERE ");
        write_expr(out, filter, 0);
        out.push(')');
    }

    if let Some(over) = &call.over {
        out.push_str(" OVER (");
        write_window(out, over);
        out.push(')');
    }
}

fn write_window(out: &mut String, window: &WindowDef) {
    let mut need_space = false;
    if !window.partition.is_empty() {
        out.push_str("PARTITION BY ");
        for (i, part) in window.partition.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_expr(out, part, 0);
        }
        need_space = true;
    }
    if !window.order_by.is_empty() {
        if need_space {
            out.push(' ');
        }
        out.push_str("ORDER BY ");
        write_sort_list(out, &window.order_by);
    }
}

fn write_sort_list(out: &mut String, keys: &[SortBy]) {
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, &key.expr, 0);
        if key.direction == SortDirection::Desc {
            out.push_str(" DESC");
        }
        match key.nulls {
            Some(NullsOrder::First) => out.push_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => out.push_str(" NULLS LAST"),
            None => {}
        }
    }
}

fn write_case(out: &mut String, case: &CaseExpr) {
    out.push_str("CASE");
    if let Some(subject) = &case.subject {
        out.push(' ');
        write_expr(out, subject, 0);
    }
    for branch in &case.branches {
        out.push_str(" WHEN ");
        write_expr(out, &branch.condition, 0);
        out.push_str(" THEN ");
        write_expr(out, &branch.result, 0);
    }
    if let Some(otherwise) = &case.otherwise {
        out.push_str(" ELSE ");
        write_expr(out, otherwise, 0);
    }
    out.push_str(" END");
}

fn write_sublink(out: &mut String, sublink: &SubLink) {
    match sublink {
        SubLink::Exists { negated, query } => {
            if *negated {
                out.push_str("NOT ");
            }
            out.push_str("EXISTS (");
            write_select(out, query);
            out.push(')');
        }
        SubLink::Scalar { query } => {
            out.push('(');
            write_select(out, query);
            out.push(')');
        }
    }
}

fn write_range_var(out: &mut String, range: &RangeVar) {
    if let Some(schema) = &range.schema {
        write_ident(out, schema);
        out.push('.');
    }
    write_ident(out, &range.name);
    if let Some(alias) = &range.alias {
        out.push_str(" AS ");
        write_ident(out, alias);
    }
}

fn write_select(out: &mut String, stmt: &SelectStmt) {
    out.push_str("SELECT ");
    for (i, target) in stmt.targets.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(out, &target.expr, 0);
        if let Some(name) = &target.name {
            out.push_str(" AS ");
            write_ident(out, name);
        }
    }

    if let Some(from) = &stmt.from {
        out.push_str(" FROM ");
        write_range_var(out, from);
    }

    if let Some(filter) = &stmt.filter {
        out.push_str(" WHERE ");
        write_expr(out, filter, 0);
    }

    if !stmt.group_by.is_empty() {
        out.push_str(" GROUP BY ");
        for (i, group) in stmt.group_by.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_expr(out, group, 0);
        }
    }

    if let Some(having) = &stmt.having {
        out.push_str(" HAVING ");
        write_expr(out, having, 0);
    }

    if !stmt.order_by.is_empty() {
        out.push_str(" ORDER BY ");
        write_sort_list(out, &stmt.order_by);
    }

    if let Some(limit) = &stmt.limit {
        out.push_str(" LIMIT ");
        write_expr(out, limit, 0);
    }

    if let Some(offset) = &stmt.offset {
        out.push_str(" OFFSET ");
        write_expr(out, offset, 0);
    }
}
