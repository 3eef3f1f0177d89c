//! Atrium Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod api;
pub mod persistence;

pub use adapters::SystemClock;
pub use api::{ClientConfig, ReqwestAuthApi, build_auth_manager};
pub use persistence::FileClientStorage;
