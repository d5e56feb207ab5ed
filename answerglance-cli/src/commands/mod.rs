//! CLI subcommand implementations.

pub mod library;
pub mod perf;
pub mod show;
pub mod sync;
pub mod timeline;
