//! Interactive stdin prompts.
//!
//! Inputs are blocking line reads, trimmed, not validated; the external
//! tools receive the values as-is and report their own errors.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Print `label: ` on stdout and read one trimmed line from stdin.
pub fn ask(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush().context("flush stdout")?;
    let stdin = io::stdin();
    let mut locked = stdin.lock();
    read_trimmed(&mut locked)
}

/// Use `value` when present, otherwise prompt for it.
pub fn ask_unless(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => ask(label),
    }
}

fn read_trimmed<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("read stdin")?;
    Ok(line.trim().to_string())
}
