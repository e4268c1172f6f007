use axum::extract::State;
use axum::http::{HeaderName, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};

/// Policy for pages the service renders itself. Handlers that serve user
/// content set their own `Content-Security-Policy`, which is left alone.
const DEFAULT_CSP: &str =
    "default-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; frame-ancestors 'none'";

/// Security headers applied to every response
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityHeaders {
    /// Send `Strict-Transport-Security` (production over HTTPS only)
    pub hsts: bool,
}

impl SecurityHeaders {
    pub fn new(hsts: bool) -> Self {
        Self { hsts }
    }
}

/// Security headers middleware
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn security_headers_middleware(
    State(policy): State<SecurityHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );

    if policy.hsts {
        headers.insert(
            HeaderName::from_static("strict-transport-security"),
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    headers
        .entry(HeaderName::from_static("content-security-policy"))
        .or_insert(HeaderValue::from_static(DEFAULT_CSP));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use axum_test::TestServer;

    fn app(policy: SecurityHeaders) -> Router {
        Router::new()
            .route("/", get(|| async { "hello" }))
            .route(
                "/sandboxed",
                get(|| async { ([("content-security-policy", "sandbox")], "user content") }),
            )
            .layer(middleware::from_fn_with_state(
                policy,
                security_headers_middleware,
            ))
    }

    #[tokio::test]
    async fn test_default_headers() {
        let server = TestServer::new(app(SecurityHeaders::default())).unwrap();
        let response = server.get("/").await;

        assert_eq!(response.header("x-content-type-options"), "nosniff");
        assert_eq!(response.header("x-frame-options"), "DENY");
        assert_eq!(response.header("content-security-policy"), DEFAULT_CSP);
        assert!(response.maybe_header("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_handler_csp_is_kept() {
        let server = TestServer::new(app(SecurityHeaders::default())).unwrap();
        let response = server.get("/sandboxed").await;

        assert_eq!(response.header("content-security-policy"), "sandbox");
        assert_eq!(response.header("x-content-type-options"), "nosniff");
    }

    #[tokio::test]
    async fn test_hsts_when_enabled() {
        let server = TestServer::new(app(SecurityHeaders::new(true))).unwrap();
        let response = server.get("/").await;

        assert_eq!(
            response.header("strict-transport-security"),
            "max-age=31536000; includeSubDomains"
        );
    }
}
