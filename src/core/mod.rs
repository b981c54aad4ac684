//! Pure text transforms over the template's configuration files.
//!
//! No I/O here: everything takes text in and returns text out, so the
//! rewrites are testable without a filesystem or a running container.

pub mod compose;
pub mod envfile;
