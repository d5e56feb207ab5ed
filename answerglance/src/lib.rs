//! Answerglance - shared-state synchronization for glanceable answer displays
//!
//! A producing application writes a named library of short text "answers"
//! into a key/value store shared with a display surface running in a
//! separate process. This library provides the engine on both sides of that
//! store: a TTL cache bounding cross-process reads, a deterministic
//! time-seeded answer selector, a timeline scheduler that plans future
//! refreshes per display-surface size, and operation timing against latency
//! budgets.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use std::sync::Arc;
//! use answerglance::service::AnswerService;
//! use answerglance::store::FileStore;
//! use answerglance::timeline::SizeClass;
//!
//! let store = Arc::new(FileStore::new("/var/lib/answerglance/store.json"));
//! let (service, _refresh_events) = AnswerService::new(store);
//!
//! let answer = service.snapshot_answer();
//! let plan = service.timeline(SizeClass::Medium);
//! ```

pub mod config;
pub mod library;
pub mod logging;
pub mod perf;
pub mod refresh;
pub mod selection;
pub mod service;
pub mod store;
pub mod timeline;

/// Version of the answerglance library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
