//! laraforge CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use laraforge::bootstrap::setup_application;
use laraforge::exit_codes;
use laraforge::io::config::load_config;
use laraforge::io::docker::Compose;
use laraforge::io::prompt::ask_unless;
use laraforge::logging;
use laraforge::params::RunParams;
use laraforge::provision::{MysqlPinger, provision_database};
use laraforge::publish::{commit_initial, push_to_remote};
use laraforge::scaffold::{extract_template, rewrite_compose, rewrite_env};
use laraforge::wait::{WaitError, WaitPolicy, wait_for_database};

#[derive(Parser)]
#[command(
    name = "laraforge",
    version,
    about = "Bootstrap a Laravel backend from a template archive"
)]
struct Cli {
    /// Template archive path (defaults to `archive` from laraforge.toml).
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Name of the project directory to create (prompted if omitted).
    #[arg(long)]
    project_name: Option<String>,

    /// MySQL database name (prompted if omitted).
    #[arg(long)]
    db_name: Option<String>,

    /// Host port mapped to MySQL's 3306 (prompted if omitted).
    #[arg(long)]
    db_port: Option<String>,

    /// Remote repository URL to push to (prompted if omitted).
    #[arg(long)]
    remote_url: Option<String>,

    /// Override db_wait.max_attempts from config.
    #[arg(long)]
    db_wait_max_attempts: Option<u32>,

    /// Override db_wait.interval_secs from config.
    #[arg(long)]
    db_wait_interval_secs: Option<u64>,

    /// Config file path.
    #[arg(long, default_value = "laraforge.toml")]
    config: PathBuf,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("\n❌ ERROR: {err:#}");
        eprintln!("🛑 Bootstrap aborted.");
        let code = match err.downcast_ref::<WaitError>() {
            Some(WaitError::TimedOut { .. }) => exit_codes::DB_WAIT_TIMEOUT,
            _ => exit_codes::ERROR,
        };
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(max_attempts) = cli.db_wait_max_attempts {
        config.db_wait.max_attempts = max_attempts;
    }
    if let Some(interval_secs) = cli.db_wait_interval_secs {
        config.db_wait.interval_secs = interval_secs;
    }
    config.validate()?;
    let archive = cli
        .archive
        .unwrap_or_else(|| PathBuf::from(&config.archive));

    println!("🚀 Laravel Backend Generator");
    println!("------------------------------------------------");

    let params = RunParams {
        project_name: ask_unless(cli.project_name, "📁 New project name")?,
        db_name: ask_unless(cli.db_name, "🛢 Database name")?,
        db_port: ask_unless(cli.db_port, "🐳 MySQL port (e.g. 3307)")?,
    };

    let invocation_dir = std::env::current_dir().context("resolve current directory")?;
    let project_root = params.project_root(&invocation_dir);

    println!("📦 Extracting template...");
    extract_template(&archive, &project_root)?;
    rewrite_compose(&project_root, &params.db_name, &params.db_port)?;
    rewrite_env(&project_root, &config, &params.db_name)?;

    let compose = Compose::new(&params.project_name, &project_root);
    println!("🐳 Building containers...");
    compose.up_build()?;

    println!("⏳ Waiting for MySQL to come up...");
    let pinger = MysqlPinger::new(&compose, &config);
    let policy = WaitPolicy {
        max_attempts: config.db_wait.max_attempts,
        interval: config.db_wait.interval(),
    };
    wait_for_database(&pinger, &policy)?;

    println!("🛢 Provisioning database...");
    provision_database(&compose, &config, &params.db_name)?;

    println!("🎼 Running framework setup...");
    setup_application(&compose, &config)?;

    println!("📜 Committing initial state...");
    let git = commit_initial(&project_root, &config.commit_message)?;
    let remote_url = ask_unless(cli.remote_url, "📡 New repository URL")?;
    push_to_remote(&git, &remote_url, &config.branch)?;

    println!("\n------------------------------------------------");
    println!("✅ Backend created successfully 🚀");
    println!("🌐 API available at http://localhost:8000");
    println!("------------------------------------------------");
    Ok(())
}
