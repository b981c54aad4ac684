//! Side-effecting operations: filesystem, subprocesses, prompts.

pub mod archive;
pub mod config;
pub mod docker;
pub mod git;
pub mod process;
pub mod prompt;
