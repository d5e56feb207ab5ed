//! Cross-process shared key/value store.
//!
//! The store is the only channel between the producing application and the
//! display surface's process. Both sides address values by exact key name
//! (see [`keys`]). Implementations are deliberately simple: the store holds
//! strings, and everything structured crosses it as a serialized blob.

mod file;
pub mod keys;
mod memory;
mod r#trait;
mod types;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use r#trait::SharedStore;
pub use types::StoreError;
