pub mod compiler;
pub mod error;
pub mod ir;
pub mod render;
pub mod sqlast;

// Re-export main types and functions
pub use compiler::{
    compile_expression, compile_expression_with_options, compile_query,
    compile_query_with_options, CompileOptions, DEFAULT_MAX_DEPTH,
};
pub use error::CompileError;
pub use render::{expr_to_sql, to_sql};
