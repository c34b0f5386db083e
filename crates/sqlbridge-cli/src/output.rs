//! Output formatting for compiled queries.

use anyhow::Result;
use serde_json::json;
use sqlbridge_core::sqlast::SelectStmt;

/// Plain SQL text for one compiled statement.
pub fn format_sql(stmt: &SelectStmt) -> String {
    sqlbridge_core::to_sql(stmt)
}

/// JSON object carrying the rendered SQL alongside the serialized AST.
pub fn format_json(source_name: &str, stmt: &SelectStmt, compact: bool) -> Result<String> {
    let value = json!({
        "source": source_name,
        "sql": sqlbridge_core::to_sql(stmt),
        "ast": stmt,
    });
    let rendered = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}
