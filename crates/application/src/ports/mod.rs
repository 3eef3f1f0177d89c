//! Ports implemented by the infrastructure layer.

mod auth_api;
mod clock;
mod storage;

pub use auth_api::AuthApi;
pub use clock::Clock;
pub use storage::{ClientStorage, MemoryStorage};
