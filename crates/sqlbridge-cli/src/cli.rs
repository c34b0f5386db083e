//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// sqlbridge - compile resolved query IR to SQL
#[derive(Parser, Debug)]
#[command(name = "sqlbridge")]
#[command(about = "Compile resolved query IR (JSON) to SQL text", long_about = None)]
#[command(version)]
pub struct Args {
    /// IR files to compile, one JSON query per file (reads from stdin if
    /// none provided)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "sql", value_enum)]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compact JSON output (no pretty-printing)
    #[arg(short, long)]
    pub compact: bool,

    /// Maximum expression nesting depth before compilation fails
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered SQL text, one statement per line
    Sql,
    /// One JSON object per input with the SQL and the serialized AST
    Json,
}
