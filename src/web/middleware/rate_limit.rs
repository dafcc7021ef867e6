//! Download rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{net::SocketAddr, sync::Arc};

use crate::rate_limit::{FixedWindowLimiter, RateLimitResult};
use crate::web::error::ApiError;

/// Extract the client key from a request.
///
/// Proxy headers win over the socket address so deployments behind a
/// reverse proxy still limit per end client.
pub fn get_client_ip(req: &Request<Body>) -> String {
    // X-Forwarded-For may carry a chain; the first entry is the client.
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            let ip = ip.trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    if let Some(real_ip) = req
        .headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
    {
        return real_ip.to_string();
    }

    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

/// Rate limiting middleware for the download endpoint.
///
/// Runs before the handler, so an over-quota client is refused before any
/// path resolution or filesystem work happens.
pub async fn download_rate_limit(
    limiter: Arc<FixedWindowLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let ip = get_client_ip(&req);

    match limiter.check_and_record(&ip) {
        RateLimitResult::Allowed => next.run(req).await,
        RateLimitResult::Denied { retry_after } => {
            tracing::warn!(ip = %ip, "Download rate limit exceeded");

            let mut response =
                ApiError::rate_limited("Too many requests. Please try again later.")
                    .into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after.as_secs().max(1)),
            );
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_headers(headers: &[(&str, &str)]) -> Request<Body> {
        let mut builder = Request::builder().uri("/files/test.png");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_client_ip_from_forwarded_for() {
        let req = request_with_headers(&[("X-Forwarded-For", "203.0.113.9, 10.0.0.1")]);
        assert_eq!(get_client_ip(&req), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_from_real_ip() {
        let req = request_with_headers(&[("X-Real-IP", "198.51.100.4")]);
        assert_eq!(get_client_ip(&req), "198.51.100.4");
    }

    #[test]
    fn test_forwarded_for_wins_over_real_ip() {
        let req = request_with_headers(&[
            ("X-Forwarded-For", "203.0.113.9"),
            ("X-Real-IP", "198.51.100.4"),
        ]);
        assert_eq!(get_client_ip(&req), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_from_connect_info() {
        let mut req = request_with_headers(&[]);
        let addr: SocketAddr = "192.0.2.7:54321".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(get_client_ip(&req), "192.0.2.7");
    }

    #[test]
    fn test_client_ip_fallback() {
        let req = request_with_headers(&[]);
        assert_eq!(get_client_ip(&req), "unknown");
    }
}
