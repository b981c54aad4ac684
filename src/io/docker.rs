//! Wrappers over `docker compose` and `docker exec`.
//!
//! Every invocation is scoped to the generated project via `-p <project>`
//! and runs with the project root as working directory; the tool never
//! changes its own working directory.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use tracing::{debug, instrument};

use super::process::{Captured, run_captured, run_passthrough};

const PS_TIMEOUT: Duration = Duration::from_secs(30);
const OUTPUT_LIMIT_BYTES: usize = 64 * 1024;

/// Wrapper for `docker compose` invocations scoped to one project.
#[derive(Debug, Clone)]
pub struct Compose {
    project: String,
    workdir: PathBuf,
}

impl Compose {
    pub fn new(project: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            project: project.into(),
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new("docker");
        cmd.arg("compose").arg("-p").arg(&self.project);
        cmd.args(args);
        cmd.current_dir(&self.workdir);
        cmd
    }

    /// Build and start all services in the background.
    ///
    /// Stdio is inherited so image build output streams to the user.
    #[instrument(skip_all, fields(project = %self.project))]
    pub fn up_build(&self) -> Result<()> {
        run_passthrough(self.command(&["up", "-d", "--build"]))
    }

    /// Run a command inside a service with stdio inherited.
    pub fn exec(&self, service: &str, args: &[&str]) -> Result<()> {
        let mut full = vec!["exec", "-T", service];
        full.extend_from_slice(args);
        run_passthrough(self.command(&full))
    }

    /// Run a command inside a service, capturing output.
    pub fn exec_captured(
        &self,
        service: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Captured> {
        let mut full = vec!["exec", "-T", service];
        full.extend_from_slice(args);
        run_captured(self.command(&full), timeout, OUTPUT_LIMIT_BYTES)
    }

    /// Resolve the container id backing a service.
    ///
    /// Empty output means the service has no running container, which is
    /// fatal for the workflow.
    #[instrument(skip_all, fields(project = %self.project, service))]
    pub fn container_id(&self, service: &str) -> Result<String> {
        let captured = run_captured(
            self.command(&["ps", "-q", service]),
            PS_TIMEOUT,
            OUTPUT_LIMIT_BYTES,
        )?;
        if !captured.status.success() {
            bail!(
                "docker compose ps -q {service} failed: {}",
                captured.stderr_lossy().trim()
            );
        }
        let id = parse_container_id(&captured.stdout_lossy())
            .ok_or_else(|| anyhow!("no running container found for service `{service}`"))?;
        debug!(container_id = %id, "resolved container id");
        Ok(id)
    }
}

/// Run a command inside a container by id with stdio inherited.
pub fn exec_in_container(container_id: &str, args: &[&str]) -> Result<()> {
    let mut cmd = Command::new("docker");
    cmd.arg("exec").arg(container_id).args(args);
    run_passthrough(cmd)
}

/// First non-empty line of `docker compose ps -q` output.
fn parse_container_id(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_id() {
        assert_eq!(
            parse_container_id("a1b2c3d4\n").as_deref(),
            Some("a1b2c3d4")
        );
    }

    #[test]
    fn empty_output_is_none() {
        assert_eq!(parse_container_id(""), None);
        assert_eq!(parse_container_id("\n  \n"), None);
    }

    #[test]
    fn multiple_replicas_use_first_id() {
        assert_eq!(
            parse_container_id("first\nsecond\n").as_deref(),
            Some("first")
        );
    }
}
