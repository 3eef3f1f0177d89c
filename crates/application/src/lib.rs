//! Atrium Application - Session and auth orchestration
//!
//! This crate holds the client-side authentication subsystem:
//! - `SessionStore`: durable bearer-token persistence and credential provider
//! - `AuthManager`: the sign-in/sign-out/bootstrap/refresh state machine
//! - `ResponseInterceptor`: rotated-token capture and forced sign-out on 401
//!
//! Infrastructure adapters implement the ports defined in [`ports`].

pub mod auth;
pub mod error;
pub mod ports;

pub use auth::{AuthManager, AuthSnapshot, AuthState, ResponseInterceptor, SessionStore};
pub use error::{ApiError, ApiResult};
pub use ports::{AuthApi, ClientStorage, Clock, MemoryStorage};
