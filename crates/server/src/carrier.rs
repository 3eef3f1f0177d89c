//! Carrier endpoint adapters.
//!
//! Two outbound seams: the client-credentials grant exchange against the
//! identity endpoint, and the forward of address payloads to the
//! validation endpoint. Both are trait objects so the cache and handler
//! can be tested against fakes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use atrium_domain::GrantResponse;

use crate::config::ServerConfig;
use crate::error::ProxyError;

/// Content-Type for form-urlencoded data.
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Error body of a failed grant exchange.
#[derive(Debug, Deserialize)]
struct GrantErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Port over the carrier identity endpoint.
#[async_trait]
pub trait GrantExchanger: Send + Sync {
    /// Performs one client-credentials grant exchange.
    async fn exchange(&self) -> Result<GrantResponse, ProxyError>;
}

/// Grant exchanger backed by reqwest.
pub struct HttpGrantExchanger {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl HttpGrantExchanger {
    /// Creates an exchanger for the configured identity endpoint.
    #[must_use]
    pub fn new(http: Client, config: &ServerConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl GrantExchanger for HttpGrantExchanger {
    async fn exchange(&self) -> Result<GrantResponse, ProxyError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        let body = serde_urlencoded::to_string(params).map_err(|e| {
            ProxyError::AuthBackendUnavailable(format!("failed to encode grant form: {e}"))
        })?;

        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| ProxyError::AuthBackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(parsed) = serde_json::from_str::<GrantErrorBody>(&error_text) {
                return Err(ProxyError::AuthBackendUnavailable(
                    parsed.error_description.unwrap_or(parsed.error),
                ));
            }
            return Err(ProxyError::AuthBackendUnavailable(format!(
                "grant request failed: {error_text}"
            )));
        }

        response.json().await.map_err(|e| {
            ProxyError::AuthBackendUnavailable(format!("failed to parse grant response: {e}"))
        })
    }
}

/// Status and body relayed from the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    /// Upstream HTTP status.
    pub status: u16,
    /// Upstream body, relayed verbatim.
    pub body: Vec<u8>,
}

/// Port over the carrier address-validation endpoint.
#[async_trait]
pub trait AddressUpstream: Send + Sync {
    /// Forwards the payload with the given bearer token.
    ///
    /// A non-2xx upstream status is a successful forward; only transport
    /// failures are errors.
    async fn forward(
        &self,
        token: &str,
        payload: &serde_json::Value,
    ) -> Result<UpstreamReply, ProxyError>;
}

/// Address upstream backed by reqwest.
pub struct HttpAddressUpstream {
    http: Client,
    validation_url: String,
}

impl HttpAddressUpstream {
    /// Creates a forwarder for the configured validation endpoint.
    #[must_use]
    pub fn new(http: Client, config: &ServerConfig) -> Self {
        Self {
            http,
            validation_url: config.validation_url.clone(),
        }
    }
}

#[async_trait]
impl AddressUpstream for HttpAddressUpstream {
    async fn forward(
        &self,
        token: &str,
        payload: &serde_json::Value,
    ) -> Result<UpstreamReply, ProxyError> {
        let response = self
            .http
            .post(&self.validation_url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(|e| ProxyError::Forwarding(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ProxyError::Forwarding(e.to_string()))?
            .to_vec();

        Ok(UpstreamReply { status, body })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_form_encoding() {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", "my id"),
            ("client_secret", "s&cret"),
        ];
        let body = serde_urlencoded::to_string(params).unwrap();
        assert_eq!(
            body,
            "grant_type=client_credentials&client_id=my+id&client_secret=s%26cret"
        );
    }

    #[test]
    fn test_grant_error_body_parse() {
        let body = r#"{"error":"invalid_client","error_description":"bad secret"}"#;
        let parsed: GrantErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error_description.as_deref(), Some("bad secret"));

        let bare = r#"{"error":"invalid_client"}"#;
        let parsed: GrantErrorBody = serde_json::from_str(bare).unwrap();
        assert!(parsed.error_description.is_none());
    }
}
