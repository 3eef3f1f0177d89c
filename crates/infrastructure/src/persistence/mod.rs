//! Durable client-side persistence.

mod file_storage;

pub use file_storage::FileClientStorage;
