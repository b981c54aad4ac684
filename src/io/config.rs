//! Tool configuration loaded from `laraforge.toml` in the invocation
//! directory.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Bootstrap configuration (TOML).
///
/// Every field defaults to the stock Laravel template's values, so the
/// file is optional and may set only the keys it cares about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ForgeConfig {
    /// Template archive consumed from the invocation directory.
    pub archive: String,

    /// Compose service running MySQL.
    pub db_service: String,

    /// Compose service running the Laravel app.
    pub app_service: String,

    /// MySQL user granted on the new database and written to `.env`.
    pub db_username: String,

    /// Password for root and the granted user in the template image.
    pub db_password: String,

    /// Hostname the app uses to reach MySQL (compose service DNS name).
    pub db_host: String,

    /// Commit message for the initial commit.
    pub commit_message: String,

    /// Branch the initial commit is pushed to.
    pub branch: String,

    pub db_wait: WaitConfig,
}

/// How long and how often to poll the database for readiness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WaitConfig {
    /// Give up after this many failed readiness polls.
    pub max_attempts: u32,
    /// Pause between polls, in seconds.
    pub interval_secs: u64,
    /// Deadline for a single ping invocation, in seconds.
    pub ping_timeout_secs: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval_secs: 3,
            ping_timeout_secs: 10,
        }
    }
}

impl WaitConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            archive: "backend-repo.zip".to_string(),
            db_service: "db".to_string(),
            app_service: "app".to_string(),
            db_username: "laravel".to_string(),
            db_password: "root".to_string(),
            db_host: "db".to_string(),
            commit_message: "Initial backend setup".to_string(),
            branch: "main".to_string(),
            db_wait: WaitConfig::default(),
        }
    }
}

impl ForgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.archive.trim().is_empty() {
            return Err(anyhow!("archive must not be empty"));
        }
        if self.db_service.trim().is_empty() || self.app_service.trim().is_empty() {
            return Err(anyhow!("db_service and app_service must not be empty"));
        }
        if self.branch.trim().is_empty() {
            return Err(anyhow!("branch must not be empty"));
        }
        if self.db_wait.max_attempts == 0 {
            return Err(anyhow!("db_wait.max_attempts must be > 0"));
        }
        if self.db_wait.ping_timeout_secs == 0 {
            return Err(anyhow!("db_wait.ping_timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ForgeConfig::default()`.
pub fn load_config(path: &Path) -> Result<ForgeConfig> {
    if !path.exists() {
        let cfg = ForgeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ForgeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ForgeConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("laraforge.toml");
        fs::write(
            &path,
            "archive = \"template.zip\"\n\n[db_wait]\nmax_attempts = 5\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.archive, "template.zip");
        assert_eq!(cfg.db_wait.max_attempts, 5);
        assert_eq!(cfg.db_wait.interval_secs, 3);
        assert_eq!(cfg.db_service, "db");
    }

    #[test]
    fn zero_max_attempts_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("laraforge.toml");
        fs::write(&path, "[db_wait]\nmax_attempts = 0\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn empty_archive_is_rejected() {
        let cfg = ForgeConfig {
            archive: " ".to_string(),
            ..ForgeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
