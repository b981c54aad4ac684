//! Container bring-up, database readiness, and database provisioning.

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::io::config::ForgeConfig;
use crate::io::docker::Compose;
use crate::wait::{DbPinger, PingOutcome};

/// Marker `mysqladmin ping` prints when the server answers.
const ALIVE_MARKER: &str = "mysqld is alive";

/// Pings MySQL through `docker compose exec` on the db service.
pub struct MysqlPinger<'a> {
    compose: &'a Compose,
    config: &'a ForgeConfig,
}

impl<'a> MysqlPinger<'a> {
    pub fn new(compose: &'a Compose, config: &'a ForgeConfig) -> Self {
        Self { compose, config }
    }
}

impl DbPinger for MysqlPinger<'_> {
    fn ping(&self) -> Result<PingOutcome> {
        let root_pass = format!("-p{}", self.config.db_password);
        let captured = self.compose.exec_captured(
            &self.config.db_service,
            &["mysqladmin", "ping", "-h", "localhost", "-uroot", &root_pass],
            self.config.db_wait.ping_timeout(),
        )?;
        // `exec` exits non-zero while the container is still starting up;
        // that is the expected not-ready state, not an error.
        if is_alive(&captured.stdout_lossy()) {
            Ok(PingOutcome::Ready)
        } else {
            debug!(
                exit = ?captured.status.code(),
                timed_out = captured.timed_out,
                "ping not ready"
            );
            Ok(PingOutcome::NotReady)
        }
    }
}

fn is_alive(stdout: &str) -> bool {
    stdout.contains(ALIVE_MARKER)
}

/// Create the database and grant privileges inside the db service.
#[instrument(skip_all, fields(db_name))]
pub fn provision_database(compose: &Compose, config: &ForgeConfig, db_name: &str) -> Result<()> {
    let root_pass = format!("-p{}", config.db_password);

    let create = format!("CREATE DATABASE IF NOT EXISTS {db_name};");
    compose
        .exec(
            &config.db_service,
            &["mysql", "-uroot", &root_pass, "-e", &create],
        )
        .context("create database")?;

    let grant = format!(
        "GRANT ALL PRIVILEGES ON {db_name}.* TO '{user}'@'%'; FLUSH PRIVILEGES;",
        user = config.db_username
    );
    compose
        .exec(
            &config.db_service,
            &["mysql", "-uroot", &root_pass, "-e", &grant],
        )
        .context("grant privileges")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_in_stdout_means_alive() {
        assert!(is_alive("mysqld is alive\n"));
    }

    #[test]
    fn connection_errors_are_not_alive() {
        assert!(!is_alive(
            "mysqladmin: connect to server at 'localhost' failed"
        ));
        assert!(!is_alive(""));
    }
}
