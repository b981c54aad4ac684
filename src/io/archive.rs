//! Template archive handling: existence guard, extraction, flattening.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, instrument};

use super::process::run_passthrough;

/// Fail unless `path` is an existing regular file.
///
/// Precondition guards run before any destructive step, so a missing
/// artifact aborts with nothing started.
pub fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("required file not found: {}", path.display());
    }
    Ok(())
}

/// Extract `archive` into `dest`, creating `dest` first.
///
/// Extraction is delegated to `unzip`; like every other step the tool
/// trusts the external binary's exit code.
#[instrument(skip_all, fields(archive = %archive.display(), dest = %dest.display()))]
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    require_file(archive)?;
    fs::create_dir_all(dest).with_context(|| format!("create directory {}", dest.display()))?;

    let mut cmd = Command::new("unzip");
    cmd.arg("-q").arg(archive).arg("-d").arg(dest);
    run_passthrough(cmd)
}

/// Collapse a single wrapper directory produced by extraction.
///
/// Zip templates exported from hosting UIs usually wrap everything in one
/// top-level folder. If `root` contains exactly one directory (top-level
/// files do not count), its contents move up into `root` and the wrapper
/// is removed. Zero or multiple directories leave `root` untouched.
///
/// Returns whether a wrapper was flattened.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn flatten_single_root(root: &Path) -> Result<bool> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    let entries =
        fs::read_dir(root).with_context(|| format!("read directory {}", root.display()))?;
    for entry in entries {
        let entry = entry.context("read directory entry")?;
        if entry.file_type().context("entry file type")?.is_dir() {
            dirs.push(entry.path());
        }
    }

    let [wrapper] = dirs.as_slice() else {
        debug!(dir_count = dirs.len(), "no single wrapper directory");
        return Ok(false);
    };

    let inner = fs::read_dir(wrapper)
        .with_context(|| format!("read directory {}", wrapper.display()))?;
    for entry in inner {
        let entry = entry.context("read wrapper entry")?;
        let target = root.join(entry.file_name());
        fs::rename(entry.path(), &target).with_context(|| {
            format!("move {} to {}", entry.path().display(), target.display())
        })?;
    }
    fs::remove_dir(wrapper).with_context(|| format!("remove wrapper {}", wrapper.display()))?;
    info!(wrapper = %wrapper.display(), "flattened wrapper directory");
    Ok(true)
}
