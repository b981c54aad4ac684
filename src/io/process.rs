//! Helpers for running external commands.
//!
//! Every workflow step shells out to a pre-existing tool. Two modes:
//! passthrough (stdio inherited so the user watches the tool run) and
//! captured (output collected with a size limit and a kill-on-deadline
//! timeout). In both, the first non-zero exit aborts the workflow with a
//! diagnostic naming the command.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, instrument, warn};
use wait_timeout::ChildExt;

/// Captured output of a finished child process.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub timed_out: bool,
}

impl Captured {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Render a command for diagnostics: `program arg1 arg2 ...`.
pub fn render(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| arg.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Run a command with stdio inherited and fail on a non-zero exit.
#[instrument(skip_all, fields(command = %render(&cmd)))]
pub fn run_passthrough(mut cmd: Command) -> Result<()> {
    let label = render(&cmd);
    debug!("running passthrough command");
    let status = cmd.status().with_context(|| format!("spawn `{label}`"))?;
    if !status.success() {
        bail!("command failed: `{label}` ({status})");
    }
    Ok(())
}

/// Run a command with a timeout, capturing stdout/stderr without risking
/// pipe deadlocks.
///
/// Output is read concurrently while the child runs; bytes beyond
/// `output_limit_bytes` per stream are discarded while still draining the
/// pipe. On timeout the child is killed and `timed_out` is set; the caller
/// decides whether that is fatal.
#[instrument(skip_all, fields(command = %render(&cmd), timeout_secs = timeout.as_secs()))]
pub fn run_captured(
    mut cmd: Command,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Result<Captured> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let label = render(&cmd);
    debug!("spawning child process");
    let mut child = cmd.spawn().with_context(|| format!("spawn `{label}`"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || read_limited(stdout, output_limit_bytes));
    let stderr_handle = thread::spawn(move || read_limited(stderr, output_limit_bytes));

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => status,
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            timed_out = true;
            child.kill().context("kill command")?;
            child.wait().context("wait command after kill")?
        }
    };

    let stdout = join_reader(stdout_handle).context("join stdout")?;
    let stderr = join_reader(stderr_handle).context("join stderr")?;

    debug!(exit_code = ?status.code(), timed_out, "command finished");
    Ok(Captured {
        status,
        stdout,
        stderr,
        timed_out,
    })
}

fn join_reader(handle: thread::JoinHandle<Result<Vec<u8>>>) -> Result<Vec<u8>> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_limited<R: Read>(mut reader: R, limit: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            buf.extend_from_slice(&chunk[..n.min(remaining)]);
        }
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn passthrough_succeeds_on_zero_exit() {
        run_passthrough(sh("exit 0")).expect("zero exit");
    }

    #[test]
    fn passthrough_error_names_the_command() {
        let err = run_passthrough(sh("exit 3")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("command failed"), "got: {msg}");
        assert!(msg.contains("exit 3"), "got: {msg}");
    }

    #[test]
    fn captured_collects_stdout() {
        let out = run_captured(sh("printf ready"), Duration::from_secs(5), 1024).expect("run");
        assert!(out.status.success());
        assert_eq!(out.stdout_lossy(), "ready");
        assert!(!out.timed_out);
    }

    #[test]
    fn captured_enforces_output_limit() {
        let out = run_captured(sh("printf 0123456789"), Duration::from_secs(5), 4).expect("run");
        assert_eq!(out.stdout, b"0123");
    }

    #[test]
    fn captured_reports_spawn_failure() {
        let cmd = Command::new("laraforge-no-such-binary");
        let err = run_captured(cmd, Duration::from_secs(1), 1024).unwrap_err();
        assert!(err.to_string().contains("spawn"));
    }

    #[test]
    fn render_includes_program_and_args() {
        let mut cmd = Command::new("docker");
        cmd.args(["compose", "up"]);
        assert_eq!(render(&cmd), "docker compose up");
    }
}
