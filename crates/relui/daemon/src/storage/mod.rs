//! Storage layer for relui-daemon
//!
//! The store exclusively owns persisted workflow runs. Request handlers read
//! through it on every request and never keep runs between requests.

mod file;
mod memory;
mod traits;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use traits::{StorageResult, WorkflowStore};
