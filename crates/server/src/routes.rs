//! HTTP surface of the carrier proxy.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::carrier::{AddressUpstream, UpstreamReply};
use crate::error::ProxyError;
use crate::token_cache::CarrierTokenCache;

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client-credentials token cache.
    pub cache: Arc<CarrierTokenCache>,
    /// Forwarder to the carrier validation endpoint.
    pub upstream: Arc<dyn AddressUpstream>,
}

/// Builds the proxy router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/validate-address", post(validate_address))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        // The dashboard is served from a different origin than the proxy.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Forwards an arbitrary address payload to the carrier.
///
/// The upstream's status and body are relayed verbatim, including
/// rejections; only internal failures (token acquisition, transport)
/// become a 500.
async fn validate_address(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    match proxy_call(&state, &payload).await {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                reply.body,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(%error, "address validation proxy failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "address validation failed",
            )
                .into_response()
        }
    }
}

async fn proxy_call(
    state: &AppState,
    payload: &serde_json::Value,
) -> Result<UpstreamReply, ProxyError> {
    let token = state.cache.get_token().await?;
    state.upstream.forward(&token, payload).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::carrier::GrantExchanger;
    use crate::clock::{Clock, SystemClock};
    use atrium_domain::GrantResponse;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct FakeExchanger {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl GrantExchanger for FakeExchanger {
        async fn exchange(&self) -> Result<GrantResponse, ProxyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ProxyError::AuthBackendUnavailable(
                    "invalid_client".to_string(),
                ));
            }
            Ok(GrantResponse {
                access_token: "abc".to_string(),
                expires_in: 3600,
            })
        }
    }

    struct FakeUpstream {
        seen: Mutex<Vec<(String, Value)>>,
        reply: UpstreamReply,
    }

    #[async_trait]
    impl AddressUpstream for FakeUpstream {
        async fn forward(
            &self,
            token: &str,
            payload: &Value,
        ) -> Result<UpstreamReply, ProxyError> {
            self.seen
                .lock()
                .unwrap()
                .push((token.to_string(), payload.clone()));
            Ok(self.reply.clone())
        }
    }

    struct Harness {
        state: AppState,
        exchanger: Arc<FakeExchanger>,
        upstream: Arc<FakeUpstream>,
    }

    fn harness(exchanger_fails: bool, reply: UpstreamReply) -> Harness {
        let exchanger = Arc::new(FakeExchanger {
            calls: AtomicUsize::new(0),
            fail: exchanger_fails,
        });
        let upstream = Arc::new(FakeUpstream {
            seen: Mutex::new(Vec::new()),
            reply,
        });
        let cache = Arc::new(CarrierTokenCache::new(
            Arc::clone(&exchanger) as Arc<dyn GrantExchanger>,
            Arc::new(SystemClock::new()) as Arc<dyn Clock>,
        ));
        let state = AppState {
            cache,
            upstream: Arc::clone(&upstream) as Arc<dyn AddressUpstream>,
        };
        Harness {
            state,
            exchanger,
            upstream,
        }
    }

    fn ok_reply(body: &str) -> UpstreamReply {
        UpstreamReply {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    fn validate_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/validate-address")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_cold_cache_exchanges_then_forwards() {
        let h = harness(false, ok_reply(r#"{"valid":true}"#));

        let response = router(h.state.clone())
            .oneshot(validate_request(r#"{"address":{"city":"Memphis"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"valid":true}"#);

        assert_eq!(h.exchanger.calls.load(Ordering::SeqCst), 1);
        let seen = h.upstream.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "abc");
        assert_eq!(seen[0].1, json!({"address": {"city": "Memphis"}}));
    }

    #[tokio::test]
    async fn test_warm_cache_issues_no_additional_grant() {
        let h = harness(false, ok_reply("{}"));
        let app = router(h.state.clone());

        app.clone()
            .oneshot(validate_request(r#"{"address":{"city":"Memphis"}}"#))
            .await
            .unwrap();
        app.oneshot(validate_request(r#"{"address":{"city":"Austin"}}"#))
            .await
            .unwrap();

        assert_eq!(h.exchanger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.upstream.seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_relayed_verbatim() {
        let h = harness(
            false,
            UpstreamReply {
                status: 422,
                body: br#"{"errors":[{"code":"INVALID.POSTAL"}]}"#.to_vec(),
            },
        );

        let response = router(h.state)
            .oneshot(validate_request(r#"{"address":{}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"errors":[{"code":"INVALID.POSTAL"}]}"#);
    }

    #[tokio::test]
    async fn test_grant_failure_is_500_with_plain_message() {
        let h = harness(true, ok_reply("{}"));

        let response = router(h.state)
            .oneshot(validate_request(r#"{"address":{}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"address validation failed");
        // Nothing was forwarded.
        assert!(h.upstream.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let h = harness(false, ok_reply("{}"));
        let response = router(h.state)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
