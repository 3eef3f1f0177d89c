//! Client-side authentication subsystem.
//!
//! This module provides:
//! - Durable session persistence and per-request credential lookup
//! - The sign-in/sign-out/bootstrap/refresh state machine
//! - Response interception for rotated tokens and forced sign-out

mod interceptor;
mod manager;
mod session_store;
mod state;

pub use interceptor::{ROTATED_TOKEN_HEADER, ResponseInterceptor};
pub use manager::AuthManager;
pub use session_store::SessionStore;
pub use state::{AuthSnapshot, AuthState};
