//! Project scaffolding: extraction, compose rewrite, env rewrite.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::core::{compose, envfile};
use crate::io::archive::{extract, flatten_single_root, require_file};
use crate::io::config::ForgeConfig;

/// Unpack the template archive into `project_root` and collapse a single
/// wrapper directory if the archive ships one.
#[instrument(skip_all)]
pub fn extract_template(archive: &Path, project_root: &Path) -> Result<()> {
    extract(archive, project_root)?;
    flatten_single_root(project_root)?;
    Ok(())
}

/// Rewrite `docker-compose.yml` in place for the chosen database and port.
#[instrument(skip_all, fields(db_name, db_port))]
pub fn rewrite_compose(project_root: &Path, db_name: &str, db_port: &str) -> Result<()> {
    let path = project_root.join("docker-compose.yml");
    require_file(&path)?;

    let contents =
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let contents = compose::strip_container_names(&contents);
    let contents = compose::substitute_database(&contents, db_name)?;
    let contents = compose::substitute_port(&contents, db_port)?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    info!("rewrote docker-compose.yml");
    Ok(())
}

/// Copy `.env.example` to `.env` and point it at the provisioned database.
#[instrument(skip_all, fields(db_name))]
pub fn rewrite_env(project_root: &Path, config: &ForgeConfig, db_name: &str) -> Result<()> {
    let template = project_root.join(".env.example");
    require_file(&template)?;

    let env_path = project_root.join(".env");
    fs::copy(&template, &env_path).with_context(|| {
        format!("copy {} to {}", template.display(), env_path.display())
    })?;

    let contents =
        fs::read_to_string(&env_path).with_context(|| format!("read {}", env_path.display()))?;
    let db_env = envfile::DatabaseEnv {
        username: config.db_username.clone(),
        password: config.db_password.clone(),
        database: db_name.to_string(),
        host: config.db_host.clone(),
    };
    let contents = envfile::apply_database_env(&contents, &db_env)?;
    fs::write(&env_path, contents).with_context(|| format!("write {}", env_path.display()))?;
    info!("wrote .env");
    Ok(())
}
