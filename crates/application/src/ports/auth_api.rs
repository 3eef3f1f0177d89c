//! Backend auth endpoint port.

use async_trait::async_trait;
use atrium_domain::{SignInRequest, SignInResponse, SignUpRequest, User, UserUpdate, ValidatedSession};

use crate::error::ApiResult;

/// Port over the backend's authentication endpoints.
///
/// The production implementation is an HTTP client that injects the
/// current bearer token per request and feeds every response through the
/// installed interceptor; tests substitute scripted fakes.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Posts credentials to the sign-in endpoint.
    async fn sign_in(&self, request: &SignInRequest) -> ApiResult<SignInResponse>;

    /// Posts registration fields to the sign-up endpoint.
    async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<SignInResponse>;

    /// Validates the given bearer token and returns the current user.
    ///
    /// A rotated token delivered via response header is lifted into the
    /// returned [`ValidatedSession`].
    async fn validate(&self, token: &str) -> ApiResult<ValidatedSession>;

    /// Posts to the refresh endpoint; returns the rotated token, if any.
    async fn refresh(&self) -> ApiResult<Option<String>>;

    /// Sends partial user fields to the update endpoint.
    async fn update_user(&self, update: &UserUpdate) -> ApiResult<User>;
}
