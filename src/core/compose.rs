//! Compose-file text transforms.
//!
//! The template is rewritten textually, never parsed as YAML: line
//! filtering plus literal substitution against known template strings. A
//! literal missing from the template is an error, so template drift
//! surfaces instead of silently producing a half-configured file.

use anyhow::{Result, bail};

/// Database name the stock template ships with.
pub const DEFAULT_DB_LITERAL: &str = "MYSQL_DATABASE: laravel_backend";
/// Port mapping the stock template ships with.
pub const DEFAULT_PORT_LITERAL: &str = "\"3306:3306\"";

/// Remove every line mentioning `container_name`.
///
/// Fixed container names collide across projects generated from the same
/// template; compose assigns project-scoped names once they are gone. All
/// other lines are preserved byte-for-byte, in order, including their line
/// endings.
pub fn strip_container_names(input: &str) -> String {
    input
        .split_inclusive('\n')
        .filter(|line| !line.contains("container_name"))
        .collect()
}

/// Replace the template's default database name with `db_name`.
pub fn substitute_database(input: &str, db_name: &str) -> Result<String> {
    replace_literal(
        input,
        DEFAULT_DB_LITERAL,
        &format!("MYSQL_DATABASE: {db_name}"),
    )
}

/// Replace the template's default port mapping with `"<db_port>:3306"`.
pub fn substitute_port(input: &str, db_port: &str) -> Result<String> {
    replace_literal(input, DEFAULT_PORT_LITERAL, &format!("\"{db_port}:3306\""))
}

fn replace_literal(input: &str, needle: &str, replacement: &str) -> Result<String> {
    if !input.contains(needle) {
        bail!("compose template does not contain expected literal `{needle}`");
    }
    Ok(input.replacen(needle, replacement, 1))
}
