//! HTTP response handling.
//!
//! [`Response`] is the buffered response a transport collaborator returns:
//! status, headers, and a fully-read body. Handlers read it in place, so
//! several extraction steps may observe the same body.

use bytes::Bytes;
use http::HeaderMap;
use tracing::debug;

use crate::{Cookie, Result};

/// HTTP response with status, headers, and buffered body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Cookies parsed from the `Set-Cookie` headers.
    ///
    /// Unparsable headers are skipped.
    #[must_use]
    pub fn cookies(&self) -> Vec<Cookie> {
        self.headers
            .get_all(http::header::SET_COOKIE)
            .iter()
            .filter_map(|value| {
                let raw = value.to_str().ok()?;
                let cookie = Cookie::parse(raw);
                if cookie.is_none() {
                    debug!(header = raw, "skipping unparsable cookie");
                }
                cookie
            })
            .collect()
    }

    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.to_vec()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );

        let response = Response::new(200, headers, Bytes::from(r#"{"id":1}"#));

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_status_checks() {
        let response = Response::new(301, HeaderMap::new(), Bytes::new());
        assert!(response.is_redirection());

        let response = Response::new(404, HeaderMap::new(), Bytes::new());
        assert!(response.is_client_error());

        let response = Response::new(500, HeaderMap::new(), Bytes::new());
        assert!(response.is_server_error());
    }

    #[test]
    fn response_json() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct User {
            id: u64,
            name: String,
        }

        let body = Bytes::from(r#"{"id":1,"name":"test"}"#);
        let response = Response::new(200, HeaderMap::new(), body);

        let user: User = response.json().expect("deserialize");
        assert_eq!(
            user,
            User {
                id: 1,
                name: "test".to_string()
            }
        );
    }

    #[test]
    fn response_text() {
        let body = Bytes::from("Hello, World!");
        let response = Response::new(200, HeaderMap::new(), body);

        let text = response.text().expect("text");
        assert_eq!(text, "Hello, World!");
    }

    #[test]
    fn response_text_invalid_utf8() {
        let body = Bytes::from_static(&[0xff, 0xfe]);
        let response = Response::new(200, HeaderMap::new(), body);

        let err = response.text().expect_err("should fail");
        assert_eq!(err.op(), "to_string");
    }

    #[test]
    fn response_cookies() {
        let mut headers = HeaderMap::new();
        headers.append(
            http::header::SET_COOKIE,
            HeaderValue::from_static("session=abc; Path=/; HttpOnly"),
        );
        headers.append(
            http::header::SET_COOKIE,
            HeaderValue::from_static("theme=dark"),
        );

        let response = Response::new(200, headers, Bytes::new());
        let cookies = response.cookies();

        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.first().map(|c| c.name.as_str()), Some("session"));
        assert_eq!(cookies.get(1).map(|c| c.value.as_str()), Some("dark"));
    }

    #[test]
    fn response_cookies_skips_unparsable() {
        let mut headers = HeaderMap::new();
        headers.append(
            http::header::SET_COOKIE,
            HeaderValue::from_static("not-a-cookie"),
        );
        headers.append(
            http::header::SET_COOKIE,
            HeaderValue::from_static("ok=1"),
        );

        let response = Response::new(200, headers, Bytes::new());
        let cookies = response.cookies();

        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.first().map(|c| c.name.as_str()), Some("ok"));
    }

    #[test]
    fn response_cookies_empty() {
        let response = Response::new(204, HeaderMap::new(), Bytes::new());
        assert!(response.cookies().is_empty());
    }
}
