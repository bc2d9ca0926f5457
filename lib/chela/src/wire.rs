//! Transport-level request representation.
//!
//! A [`Request`] is what a [`Requester`](crate::Requester) hands to its
//! [`HttpClient`](crate::HttpClient) collaborator at execution time: the URL
//! is parsed, the header collection is final, and the body (if any) is a
//! buffered byte sequence. Timeout and proxy are transport hints - the
//! bundled client honors them, custom collaborators may ignore them.

use std::time::Duration;

use bytes::Bytes;
use http::HeaderMap;
use url::Url;

use crate::Method;

/// An HTTP request ready for execution by a transport collaborator.
#[derive(Debug)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
    timeout: Option<Duration>,
    proxy: Option<Url>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        url: Url,
        headers: HeaderMap,
        body: Option<Bytes>,
        timeout: Option<Duration>,
        proxy: Option<Url>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
            timeout,
            proxy,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Per-request timeout hint.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Proxy hint.
    #[must_use]
    pub const fn proxy(&self) -> Option<&Url> {
        self.proxy.as_ref()
    }

    /// Consume into (method, url, headers, body, timeout, proxy).
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        Url,
        HeaderMap,
        Option<Bytes>,
        Option<Duration>,
        Option<Url>,
    ) {
        (
            self.method,
            self.url,
            self.headers,
            self.body,
            self.timeout,
            self.proxy,
        )
    }
}
