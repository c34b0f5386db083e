//! Input handling for file reading and stdin support.

use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::PathBuf;

/// One IR document to compile, with a name for error reporting.
#[derive(Debug, Clone)]
pub struct IrSource {
    pub name: String,
    pub content: String,
}

/// Read IR input from files or stdin.
///
/// If no files are provided, reads from stdin. Each file holds one JSON
/// query document.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<IrSource>> {
    if files.is_empty() {
        read_from_stdin()
    } else {
        read_from_files(files)
    }
}

fn read_from_stdin() -> Result<Vec<IrSource>> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    Ok(vec![IrSource {
        name: "<stdin>".to_string(),
        content,
    }])
}

fn read_from_files(files: &[PathBuf]) -> Result<Vec<IrSource>> {
    files
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            Ok(IrSource {
                name: path.display().to_string(),
                content,
            })
        })
        .collect()
}
