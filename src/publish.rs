//! Publishing the generated project to a fresh git remote.
//!
//! Split in two so the remote URL can be prompted for after the initial
//! commit exists, matching the interactive flow.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::io::git::Git;

/// Re-create history and make the initial commit.
#[instrument(skip_all)]
pub fn commit_initial(project_root: &Path, message: &str) -> Result<Git> {
    let git = Git::new(project_root);
    git.reinit().context("git init")?;
    git.add_all().context("git add")?;
    git.commit(message).context("git commit")?;
    Ok(git)
}

/// Wire up `origin`, rename the branch, and push with upstream tracking.
#[instrument(skip_all, fields(branch))]
pub fn push_to_remote(git: &Git, remote_url: &str, branch: &str) -> Result<()> {
    git.add_origin(remote_url).context("git remote add")?;
    git.rename_branch(branch).context("git branch")?;
    git.push_upstream(branch).context("git push")?;
    info!(remote = remote_url, "published");
    Ok(())
}
