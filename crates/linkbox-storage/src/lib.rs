//! Persisters for the linkbox link mapping.

pub mod file;
pub mod memory;

pub use file::JsonFilePersister;
pub use linkbox_core::{LinkMap, Persister, StoreError};
pub use memory::InMemoryPersister;
