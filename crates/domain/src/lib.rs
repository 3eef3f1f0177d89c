//! Atrium Domain - Core business types
//!
//! This crate defines the domain model for the Atrium admin console's
//! session/token subsystem and the carrier proxy. All types here are
//! pure Rust with no I/O dependencies.

pub mod auth;
pub mod carrier;
pub mod payloads;
pub mod user;

pub use auth::{AuthFailure, AuthStatus, FieldError, Session};
pub use carrier::{CarrierToken, GrantResponse};
pub use payloads::{SignInRequest, SignInResponse, SignUpRequest, UserUpdate, ValidatedSession};
pub use user::{Capability, ModulePermission, Permission, User};
