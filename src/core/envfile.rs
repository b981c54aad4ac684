//! Env-file key rewriting.
//!
//! `.env` is treated as lines of `KEY=value` assignments. Rewriting is a
//! line-anchored regex substitution: whatever value the template carried is
//! replaced wholesale.

use anyhow::{Context, Result, bail};
use regex::{NoExpand, Regex};

/// Database-related env values written into the copied template.
#[derive(Debug, Clone)]
pub struct DatabaseEnv {
    pub username: String,
    pub password: String,
    pub database: String,
    pub host: String,
}

/// Rewrite every `key=` assignment line to `key=value`.
///
/// Anchored at line start, so a key that is a suffix of another
/// (`DB_HOST` vs `REDIS_DB_HOST`) is untouched. A template with no such
/// line is an error naming the key.
pub fn set_key(input: &str, key: &str, value: &str) -> Result<String> {
    let pattern = format!(r"(?m)^{}=.*$", regex::escape(key));
    let re = Regex::new(&pattern).with_context(|| format!("build pattern for {key}"))?;
    if !re.is_match(input) {
        bail!("env template has no `{key}=` line");
    }
    let replacement = format!("{key}={value}");
    Ok(re.replace_all(input, NoExpand(&replacement)).into_owned())
}

/// Apply all database settings to the copied env template.
pub fn apply_database_env(input: &str, env: &DatabaseEnv) -> Result<String> {
    let out = set_key(input, "DB_USERNAME", &env.username)?;
    let out = set_key(&out, "DB_PASSWORD", &env.password)?;
    let out = set_key(&out, "DB_DATABASE", &env.database)?;
    set_key(&out, "DB_HOST", &env.host)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "APP_NAME=Laravel\nDB_HOST=127.0.0.1\nDB_DATABASE=laravel\nDB_USERNAME=homestead\nDB_PASSWORD=secret\n";

    fn sample_env() -> DatabaseEnv {
        DatabaseEnv {
            username: "laravel".to_string(),
            password: "root".to_string(),
            database: "shop".to_string(),
            host: "db".to_string(),
        }
    }

    #[test]
    fn rewrites_value_regardless_of_prior_content() {
        let out = set_key(SAMPLE, "DB_PASSWORD", "root").expect("set");
        assert!(out.contains("DB_PASSWORD=root\n"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn rewrites_empty_assignment() {
        let out = set_key("DB_PASSWORD=\n", "DB_PASSWORD", "root").expect("set");
        assert_eq!(out, "DB_PASSWORD=root\n");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = set_key(SAMPLE, "DB_PORT", "3307").unwrap_err();
        assert!(err.to_string().contains("DB_PORT"));
    }

    #[test]
    fn anchored_match_ignores_prefixed_keys() {
        let input = "REDIS_DB_HOST=cache\nDB_HOST=127.0.0.1\n";
        let out = set_key(input, "DB_HOST", "db").expect("set");
        assert_eq!(out, "REDIS_DB_HOST=cache\nDB_HOST=db\n");
    }

    #[test]
    fn dollar_signs_in_value_are_literal() {
        let out = set_key(SAMPLE, "DB_PASSWORD", "pa$1word").expect("set");
        assert!(out.contains("DB_PASSWORD=pa$1word\n"));
    }

    #[test]
    fn apply_database_env_sets_all_keys() {
        let out = apply_database_env(SAMPLE, &sample_env()).expect("apply");
        assert!(out.contains("DB_USERNAME=laravel\n"));
        assert!(out.contains("DB_PASSWORD=root\n"));
        assert!(out.contains("DB_DATABASE=shop\n"));
        assert!(out.contains("DB_HOST=db\n"));
        assert!(out.contains("APP_NAME=Laravel\n"));
    }

    #[test]
    fn apply_database_env_reports_first_missing_key() {
        let err = apply_database_env("APP_NAME=Laravel\n", &sample_env()).unwrap_err();
        assert!(err.to_string().contains("DB_USERNAME"));
    }
}
