//! Git adapter for publishing the generated project.
//!
//! The publish step re-creates history from scratch, so we keep a small,
//! explicit wrapper around `git` subprocess calls.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument};

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Drop any history shipped in the template and start a fresh repo.
    #[instrument(skip_all)]
    pub fn reinit(&self) -> Result<()> {
        let git_dir = self.workdir.join(".git");
        if git_dir.exists() {
            debug!("removing existing .git directory");
            fs::remove_dir_all(&git_dir)
                .with_context(|| format!("remove {}", git_dir.display()))?;
        }
        self.run_checked(&["init"])?;
        Ok(())
    }

    /// Stage all files (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "."])?;
        Ok(())
    }

    /// Commit staged changes with a message.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    /// Point `origin` at the new remote.
    pub fn add_origin(&self, url: &str) -> Result<()> {
        self.run_checked(&["remote", "add", "origin", url])?;
        Ok(())
    }

    /// Force-rename the current branch.
    pub fn rename_branch(&self, branch: &str) -> Result<()> {
        self.run_checked(&["branch", "-M", branch])?;
        Ok(())
    }

    /// Push the branch and set its upstream.
    #[instrument(skip_all, fields(branch))]
    pub fn push_upstream(&self, branch: &str) -> Result<()> {
        info!(branch, "pushing to origin");
        self.run_checked(&["push", "-u", "origin", branch])?;
        Ok(())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinit_creates_fresh_repository() {
        let temp = tempfile::tempdir().expect("tempdir");
        let git = Git::new(temp.path());

        git.reinit().expect("init");
        assert!(temp.path().join(".git").is_dir());
    }

    #[test]
    fn reinit_replaces_existing_git_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let git = Git::new(temp.path());

        git.reinit().expect("first init");
        let marker = temp.path().join(".git").join("laraforge-marker");
        fs::write(&marker, "x").expect("write marker");

        git.reinit().expect("re-init");
        assert!(temp.path().join(".git").is_dir());
        assert!(!marker.exists());
    }

    #[test]
    fn add_all_succeeds_in_fresh_repository() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("composer.json"), "{}").expect("write");
        let git = Git::new(temp.path());

        git.reinit().expect("init");
        git.add_all().expect("add");
    }
}
