//! sqlbridge CLI - compile resolved query IR to SQL

use sqlbridge_cli::cli;
use sqlbridge_cli::input;
use sqlbridge_cli::output;

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use sqlbridge_core::{compile_query_with_options, CompileOptions, DEFAULT_MAX_DEPTH};
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use cli::{Args, OutputFormat};

/// At least one input failed to compile.
const EXIT_FAILURE: u8 = 1;
/// Configuration error (bad arguments, unreadable input or output).
const EXIT_CONFIG_ERROR: u8 = 66;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::from(EXIT_FAILURE)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("sqlbridge: error: {e:#}");
            ExitCode::from(EXIT_CONFIG_ERROR)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    if args.files.is_empty() && io::stdin().is_terminal() {
        anyhow::bail!("no input files and stdin is a terminal (see --help)");
    }

    let sources = input::read_input(&args.files)?;
    let options = CompileOptions {
        max_depth: args.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
    };

    let mut rendered = Vec::new();
    let mut had_errors = false;

    for source in &sources {
        let query: sqlbridge_core::ir::SelectQuery = match serde_json::from_str(&source.content) {
            Ok(query) => query,
            Err(e) => {
                eprintln!("sqlbridge: {}: invalid IR document: {e}", source.name);
                had_errors = true;
                continue;
            }
        };

        match compile_query_with_options(&query, &options) {
            Ok(stmt) => {
                let formatted = match args.format {
                    OutputFormat::Sql => output::format_sql(&stmt),
                    OutputFormat::Json => output::format_json(&source.name, &stmt, args.compact)?,
                };
                rendered.push(formatted);
            }
            Err(e) => {
                eprintln!("sqlbridge: {}: {e}", source.name);
                had_errors = true;
            }
        }
    }

    let mut body = rendered.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    match &args.output {
        Some(path) => fs::write(path, body)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => io::stdout()
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(had_errors)
}
