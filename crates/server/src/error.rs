//! Proxy error types

use thiserror::Error;

/// Internal failures of the carrier proxy.
///
/// Both variants surface to the caller as a plain 500; the detail is
/// logged server-side. A non-2xx answer from the validation endpoint is
/// not an error here: it is relayed verbatim so the caller sees the
/// authoritative carrier response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProxyError {
    /// The identity endpoint was unreachable or rejected the credentials.
    #[error("carrier identity endpoint unavailable: {0}")]
    AuthBackendUnavailable(String),

    /// The validation endpoint could not be reached.
    #[error("failed to forward to carrier: {0}")]
    Forwarding(String),
}
