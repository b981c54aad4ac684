//! Framework setup inside the running app container.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::io::config::ForgeConfig;
use crate::io::docker::{Compose, exec_in_container};

/// Commands run inside the app container, in order.
const SETUP_COMMANDS: &[&[&str]] = &[
    &["composer", "update"],
    &["php", "artisan", "key:generate"],
    &["php", "artisan", "jwt:secret"],
    &["php", "artisan", "migrate", "--seed"],
];

/// Resolve the app container and run Composer/Artisan setup in it.
#[instrument(skip_all)]
pub fn setup_application(compose: &Compose, config: &ForgeConfig) -> Result<()> {
    let container_id = compose
        .container_id(&config.app_service)
        .context("resolve app container")?;
    info!(container_id = %container_id, "running framework setup");
    for command in SETUP_COMMANDS {
        exec_in_container(&container_id, command)?;
    }
    Ok(())
}
