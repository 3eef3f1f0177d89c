//! HTTP implementation of the `AuthApi` port using reqwest.
//!
//! Credentials are injected per request from the `SessionStore` rather
//! than through a mutable default header, and every response is fed
//! through the installed `ResponseInterceptor` before the caller sees
//! it.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use atrium_application::auth::{ROTATED_TOKEN_HEADER, ResponseInterceptor, SessionStore};
use atrium_application::error::{ApiError, ApiResult};
use atrium_application::ports::AuthApi;
use atrium_domain::{
    FieldError, SignInRequest, SignInResponse, SignUpRequest, User, UserUpdate, ValidatedSession,
};

/// Client-side configuration for the backend API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, e.g. `https://api.example.com/`.
    pub base_url: Url,
    /// Whether the backend rotates tokens via response header.
    pub rotation_header_enabled: bool,
}

/// Resolved endpoint URLs, joined once at construction.
#[derive(Debug, Clone)]
struct Endpoints {
    sign_in: Url,
    sign_up: Url,
    me: Url,
    refresh: Url,
    update: Url,
}

impl Endpoints {
    fn resolve(base_url: &Url) -> Result<Self, url::ParseError> {
        // A base without a trailing slash would drop its last segment on join.
        let base = if base_url.path().ends_with('/') {
            base_url.clone()
        } else {
            let mut base = base_url.clone();
            base.set_path(&format!("{}/", base_url.path()));
            base
        };
        Ok(Self {
            sign_in: base.join("auth/sign-in")?,
            sign_up: base.join("auth/sign-up")?,
            me: base.join("auth/me")?,
            refresh: base.join("auth/refresh")?,
            update: base.join("users/me")?,
        })
    }
}

/// `AuthApi` implementation backed by reqwest.
pub struct ReqwestAuthApi {
    http: Client,
    endpoints: Endpoints,
    session: SessionStore,
    interceptor: Arc<ResponseInterceptor>,
}

impl ReqwestAuthApi {
    /// Creates an adapter for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or the base
    /// URL cannot be resolved into endpoint URLs.
    pub fn new(
        config: &ClientConfig,
        session: SessionStore,
        interceptor: Arc<ResponseInterceptor>,
    ) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("Atrium/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let endpoints = Endpoints::resolve(&config.base_url)
            .map_err(|e| ApiError::Network(format!("invalid base URL: {e}")))?;
        Ok(Self {
            http,
            endpoints,
            session,
            interceptor,
        })
    }

    /// Current bearer token, or `Unauthorized` if none is stored.
    async fn bearer(&self) -> ApiResult<String> {
        self.session.read().await.ok_or(ApiError::Unauthorized)
    }

    /// Feeds a response through the interceptor and classifies failures.
    async fn inspect(&self, response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let rotated = rotated_token(response.headers());
        let status = response.status();

        if status.is_success() {
            self.interceptor.on_success(rotated.as_deref()).await;
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.interceptor.on_unauthorized().await;
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_error_body(status.as_u16(), &body))
    }
}

#[async_trait]
impl AuthApi for ReqwestAuthApi {
    async fn sign_in(&self, request: &SignInRequest) -> ApiResult<SignInResponse> {
        let response = self
            .http
            .post(self.endpoints.sign_in.clone())
            .json(request)
            .send()
            .await
            .map_err(map_network)?;
        let response = self.inspect(response).await?;
        response.json().await.map_err(map_network)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> ApiResult<SignInResponse> {
        let response = self
            .http
            .post(self.endpoints.sign_up.clone())
            .json(request)
            .send()
            .await
            .map_err(map_network)?;
        let response = self.inspect(response).await?;
        response.json().await.map_err(map_network)
    }

    async fn validate(&self, token: &str) -> ApiResult<ValidatedSession> {
        let response = self
            .http
            .get(self.endpoints.me.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_network)?;
        // The rotated token must reach the caller even while the
        // interceptor is inactive during bootstrap.
        let rotated = rotated_token(response.headers());
        let response = self.inspect(response).await?;
        let user: User = response.json().await.map_err(map_network)?;
        Ok(ValidatedSession {
            user,
            rotated_token: rotated,
        })
    }

    async fn refresh(&self) -> ApiResult<Option<String>> {
        let token = self.bearer().await?;
        let response = self
            .http
            .post(self.endpoints.refresh.clone())
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_network)?;
        let rotated = rotated_token(response.headers());
        self.inspect(response).await?;
        Ok(rotated)
    }

    async fn update_user(&self, update: &UserUpdate) -> ApiResult<User> {
        let token = self.bearer().await?;
        let response = self
            .http
            .put(self.endpoints.update.clone())
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(map_network)?;
        let response = self.inspect(response).await?;
        response.json().await.map_err(map_network)
    }
}

fn rotated_token(headers: &reqwest::header::HeaderMap) -> Option<String> {
    headers
        .get(ROTATED_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

/// Maps a non-2xx, non-401 response body to a typed error.
///
/// A JSON array of `{field, message}` objects becomes per-field
/// validation errors; anything else keeps the raw status and body.
fn classify_error_body(status: u16, body: &str) -> ApiError {
    if let Ok(fields) = serde_json::from_str::<Vec<FieldError>>(body)
        && !fields.is_empty()
    {
        return ApiError::Validation(fields);
    }
    ApiError::Status {
        status,
        message: body.trim().to_string(),
    }
}

fn map_network(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        return ApiError::Network("request timed out".to_string());
    }
    ApiError::Network(error.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_field_errors() {
        let body = r#"[{"field":"password","message":"required"}]"#;
        let ApiError::Validation(fields) = classify_error_body(422, body) else {
            panic!("expected validation error");
        };
        assert_eq!(fields[0].field, "password");
    }

    #[test]
    fn test_classify_empty_array_is_status() {
        assert!(matches!(
            classify_error_body(422, "[]"),
            ApiError::Status { status: 422, .. }
        ));
    }

    #[test]
    fn test_classify_plain_body_is_status() {
        let error = classify_error_body(503, "service unavailable\n");
        assert_eq!(
            error,
            ApiError::Status {
                status: 503,
                message: "service unavailable".to_string(),
            }
        );
    }

    #[test]
    fn test_endpoints_join_with_and_without_trailing_slash() {
        let with = Endpoints::resolve(&Url::parse("https://api.example.com/v1/").unwrap()).unwrap();
        assert_eq!(with.sign_in.as_str(), "https://api.example.com/v1/auth/sign-in");

        let without = Endpoints::resolve(&Url::parse("https://api.example.com/v1").unwrap()).unwrap();
        assert_eq!(without.me.as_str(), "https://api.example.com/v1/auth/me");
    }

    #[test]
    fn test_rotated_token_header_parse() {
        let mut headers = reqwest::header::HeaderMap::new();
        assert!(rotated_token(&headers).is_none());

        headers.insert(ROTATED_TOKEN_HEADER, "next-token".parse().unwrap());
        assert_eq!(rotated_token(&headers).as_deref(), Some("next-token"));
    }
}
