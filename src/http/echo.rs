//! Echo handler.
//!
//! Answers with the URL the request was addressed to and the headers it
//! carried:
//!
//! ```text
//! { "requestUrl": "<url>", "headers": { "<name>": "<value>", ... } }
//! ```
//!
//! Header names arrive lower-cased from the `http` crate, so names differing
//! only by case collapse onto one key and the last value wins. Any failure is
//! answered with `500 {"error":"echo_failed","message":...}`.

use std::collections::BTreeMap;

use axum::{
    extract::{Request, State},
    http::{header, uri::Authority, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use url::Url;

use crate::config::EchoSettings;
use crate::http::response::{json_ok, ErrorResponse};
use crate::http::server::AppState;

/// Error identifier reported on the failure path.
pub const ECHO_FAILED: &str = "echo_failed";

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Body of a successful echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub request_url: String,
    pub headers: BTreeMap<String, String>,
}

/// Anything that prevents an echo from being produced.
#[derive(Debug, thiserror::Error)]
pub enum EchoFailure {
    #[error("header '{name}' has a value that is not valid UTF-8")]
    InvalidHeaderValue { name: String },
    #[error("invalid request host '{host}'")]
    InvalidHost { host: String },
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for EchoFailure {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Echo failed");
        ErrorResponse::new(ECHO_FAILED, self.to_string())
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// `GET` handler for the echo route.
pub async fn echo_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, EchoFailure> {
    let echo = build_echo(request.uri(), request.headers(), &state.echo)?;
    let body = serde_json::to_vec(&echo)?;
    Ok(json_ok(body))
}

/// Build the echo body for a request target and its headers.
pub fn build_echo(
    uri: &Uri,
    headers: &HeaderMap,
    settings: &EchoSettings,
) -> Result<EchoResponse, EchoFailure> {
    Ok(EchoResponse {
        headers: collect_headers(headers)?,
        request_url: request_url(uri, headers, settings)?,
    })
}

/// Flatten a header map into name → value, last occurrence winning.
///
/// Values are decoded as UTF-8; obs-text that is not UTF-8 is rejected.
pub fn collect_headers(headers: &HeaderMap) -> Result<BTreeMap<String, String>, EchoFailure> {
    let mut collected = BTreeMap::new();
    for (name, value) in headers {
        let value = std::str::from_utf8(value.as_bytes()).map_err(|_| {
            EchoFailure::InvalidHeaderValue {
                name: name.as_str().to_owned(),
            }
        })?;
        collected.insert(name.as_str().to_owned(), value.to_owned());
    }
    Ok(collected)
}

/// Reconstruct the absolute URL the request was addressed to.
///
/// Absolute-form targets (HTTP/2, proxies) are taken as they are. Origin-form
/// targets are completed from the Host header or the configured fallbacks.
pub fn request_url(
    uri: &Uri,
    headers: &HeaderMap,
    settings: &EchoSettings,
) -> Result<String, EchoFailure> {
    let raw = if uri.scheme().is_some() && uri.authority().is_some() {
        uri.to_string()
    } else {
        let scheme = forwarded(headers, settings, X_FORWARDED_PROTO)
            .unwrap_or(settings.scheme.as_str());
        let host = forwarded(headers, settings, X_FORWARDED_HOST)
            .or_else(|| first_value(headers, header::HOST.as_str()))
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .unwrap_or(settings.default_host.as_str());
        let host = host
            .parse::<Authority>()
            .map_err(|_| EchoFailure::InvalidHost {
                host: host.to_owned(),
            })?;
        let path = uri.path_and_query().map_or("/", |p| p.as_str());

        format!("{scheme}://{host}{path}")
    };

    Ok(Url::parse(&raw)?.to_string())
}

fn forwarded<'a>(headers: &'a HeaderMap, settings: &EchoSettings, name: &str) -> Option<&'a str> {
    if settings.trust_forwarded_headers {
        first_value(headers, name)
    } else {
        None
    }
}

/// First comma-separated element of a header, trimmed.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::HeaderValue};
    use tower::ServiceExt;

    use crate::config::EchoConfig;
    use crate::http::HttpServer;
    use crate::previews::PreviewStore;

    fn app() -> axum::Router {
        HttpServer::new(EchoConfig::default(), PreviewStore::new()).router()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_absolute_url_scenario() {
        let request = axum::http::Request::builder()
            .uri("https://example.com/api/preview.json?x=1")
            .header("accept", "application/json")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            body_string(response).await,
            r#"{"requestUrl":"https://example.com/api/preview.json?x=1","headers":{"accept":"application/json"}}"#
        );
    }

    #[tokio::test]
    async fn test_no_headers_gives_empty_object() {
        let request = axum::http::Request::builder()
            .uri("/api/preview.json")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"{"requestUrl":"http://localhost/api/preview.json","headers":{}}"#
        );
    }

    #[tokio::test]
    async fn test_duplicate_names_last_value_wins() {
        let request = axum::http::Request::builder()
            .uri("/api/preview.json")
            .header("X-Test", "1")
            .header("x-test", "2")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["headers"], serde_json::json!({ "x-test": "2" }));
    }

    #[tokio::test]
    async fn test_unrepresentable_header_fails() {
        let request = axum::http::Request::builder()
            .uri("/api/preview.json")
            .header("x-name", HeaderValue::from_bytes(b"caf\xe9").unwrap())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "echo_failed");
        assert!(body["message"].as_str().unwrap().contains("x-name"));
    }

    #[tokio::test]
    async fn test_utf8_header_value_echoed() {
        let request = axum::http::Request::builder()
            .uri("/api/preview.json")
            .header("x-name", HeaderValue::from_bytes("café".as_bytes()).unwrap())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            r#"{"requestUrl":"http://localhost/api/preview.json","headers":{"x-name":"café"}}"#
        );
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/preview.json")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_url_from_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:8080"));
        let uri: Uri = "/api/preview.json?url=a%20b".parse().unwrap();

        let url = request_url(&uri, &headers, &EchoSettings::default()).unwrap();
        assert_eq!(url, "http://localhost:8080/api/preview.json?url=a%20b");
    }

    #[test]
    fn test_forwarded_headers_only_when_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("10.0.0.5:8080"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        headers.insert("x-forwarded-host", HeaderValue::from_static("previews.example.com"));
        let uri: Uri = "/api/preview.json".parse().unwrap();

        let mut settings = EchoSettings::default();
        assert_eq!(
            request_url(&uri, &headers, &settings).unwrap(),
            "http://10.0.0.5:8080/api/preview.json"
        );

        settings.trust_forwarded_headers = true;
        assert_eq!(
            request_url(&uri, &headers, &settings).unwrap(),
            "https://previews.example.com/api/preview.json"
        );
    }

    #[test]
    fn test_unparsable_host_fails() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("bad host"));
        let uri: Uri = "/".parse().unwrap();

        let err = request_url(&uri, &headers, &EchoSettings::default()).unwrap_err();
        assert!(matches!(err, EchoFailure::InvalidHost { .. }));
    }

    #[test]
    fn test_host_with_path_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com/x"));
        let uri: Uri = "/api/preview.json".parse().unwrap();

        let err = request_url(&uri, &headers, &EchoSettings::default()).unwrap_err();
        assert!(matches!(err, EchoFailure::InvalidHost { ref host } if host == "example.com/x"));
    }

    #[tokio::test]
    async fn test_host_with_path_fails_request() {
        let request = axum::http::Request::builder()
            .uri("/api/preview.json")
            .header("host", "example.com/x")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], "echo_failed");
    }

    #[test]
    fn test_build_echo_keeps_every_name() {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("*/*"));
        headers.insert("user-agent", HeaderValue::from_static("test"));
        let uri: Uri = "https://example.com/".parse().unwrap();

        let echo = build_echo(&uri, &headers, &EchoSettings::default()).unwrap();
        assert_eq!(echo.request_url, "https://example.com/");
        assert_eq!(echo.headers.len(), 2);
        assert_eq!(echo.headers["user-agent"], "test");
    }
}
