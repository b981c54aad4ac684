//! Laravel backend project bootstrapper.
//!
//! `laraforge` turns a template zip archive into a running, pushed backend
//! project: unpack, rewrite `docker-compose.yml` and `.env`, bring up the
//! containers, wait for MySQL, provision the database, run Composer and
//! Artisan inside the app container, and push everything to a new remote.
//!
//! The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure text transforms over the template files. No I/O,
//!   fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (filesystem, subprocesses,
//!   prompts).
//!
//! Orchestration modules ([`scaffold`], [`provision`], [`bootstrap`],
//! [`publish`]) coordinate core logic with I/O to implement the workflow
//! steps. The pipeline is strictly sequential; the only suspension point is
//! the bounded database readiness poll in [`wait`]. Failures never roll
//! back: the project directory and any started containers are left as they
//! are at the point of failure.

pub mod bootstrap;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod params;
pub mod provision;
pub mod publish;
pub mod scaffold;
pub mod wait;
