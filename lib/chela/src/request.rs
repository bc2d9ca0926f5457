//! Fluent request building and execution.
//!
//! A [`Requester`] accumulates configuration through chained calls, records
//! the first configuration failure in a sticky error, and is consumed by one
//! call to [`send`](Requester::send). Response handlers registered before
//! execution run against the received response in registration order.
//!
//! # Example
//!
//! ```ignore
//! use chela::prelude::*;
//!
//! #[derive(Debug, Default, serde::Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let mut user = User::default();
//! chela::get("https://api.example.com/users/1")
//!     .header("Accept", "application/json")
//!     .expect_code(200)
//!     .decode(&mut user)
//!     .send()
//!     .await?;
//! ```

use std::time::{Duration, Instant};

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Level, debug, info, span, warn};
use url::Url;

use crate::handler::{self, Step};
use crate::{Cookie, Error, HttpClient, Method, ReqwestClient, Result, wire};

/// Start a GET request.
#[must_use]
pub fn get<'dst>(url: impl Into<String>) -> Requester<'dst> {
    Requester::new(Method::Get, url)
}

/// Start a POST request.
#[must_use]
pub fn post<'dst>(url: impl Into<String>) -> Requester<'dst> {
    Requester::new(Method::Post, url)
}

/// Start a PUT request.
#[must_use]
pub fn put<'dst>(url: impl Into<String>) -> Requester<'dst> {
    Requester::new(Method::Put, url)
}

/// Start a DELETE request.
#[must_use]
pub fn delete<'dst>(url: impl Into<String>) -> Requester<'dst> {
    Requester::new(Method::Delete, url)
}

/// Fluent HTTP request builder.
///
/// Configuration methods are pass-through no-ops once a configuration error
/// has been recorded: the first failure freezes the configuration and
/// surfaces from [`send`](Requester::send). Handler registration is not
/// gated on the sticky error.
///
/// The `'dst` lifetime ties the builder to the handler destinations borrowed
/// from the caller; the borrows end when `send` consumes the builder.
pub struct Requester<'dst, C = ReqwestClient> {
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    timeout: Option<Duration>,
    proxy: Option<Url>,
    client: C,
    err: Option<Error>,
    steps: Vec<Step<'dst>>,
}

impl<'dst> Requester<'dst> {
    /// Create a builder for the given method and URL.
    ///
    /// The URL is not validated here; a malformed URL surfaces as an error
    /// from [`send`](Requester::send). The transport collaborator defaults
    /// to a [`ReqwestClient`] with a fixed 60-second timeout.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
            proxy: None,
            client: ReqwestClient::new(),
            err: None,
            steps: Vec::new(),
        }
    }
}

impl<'dst, C> Requester<'dst, C>
where
    C: HttpClient,
{
    // ========================================================================
    // Configuration
    // ========================================================================

    /// Route the request through the given proxy.
    #[must_use]
    pub fn proxy(mut self, proxy: Url) -> Self {
        if self.err.is_none() {
            self.proxy = Some(proxy);
        }
        self
    }

    /// Set a per-request timeout, overriding the transport default.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        if self.err.is_none() {
            self.timeout = Some(timeout);
        }
        self
    }

    /// Replace the whole header collection.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        if self.err.is_none() {
            self.headers = headers;
        }
        self
    }

    /// Upsert a single header.
    ///
    /// An invalid header name or value records a configuration error.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if self.err.is_some() {
            return self;
        }
        let name = name.as_ref();
        match (
            HeaderName::try_from(name),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            (Err(e), _) => {
                self.err = Some(Error::invalid_request(format!(
                    "invalid header name '{name}': {e}"
                )));
            }
            (_, Err(e)) => {
                self.err = Some(Error::invalid_request(format!(
                    "invalid value for header '{name}': {e}"
                )));
            }
        }
        self
    }

    /// Set the `Content-Type` header.
    #[must_use]
    pub fn content_type(self, value: impl AsRef<str>) -> Self {
        self.header(CONTENT_TYPE.as_str(), value)
    }

    /// Replace the transport collaborator.
    ///
    /// Configuration, the sticky error, and registered handlers carry over
    /// unchanged; a pending configuration error still short-circuits
    /// [`send`](Requester::send).
    #[must_use]
    pub fn http_client<C2: HttpClient>(self, client: C2) -> Requester<'dst, C2> {
        Requester {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            timeout: self.timeout,
            proxy: self.proxy,
            client,
            err: self.err,
            steps: self.steps,
        }
    }

    /// Set the request body from a string.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        if self.err.is_none() {
            self.body = Some(Bytes::from(body.into()));
        }
        self
    }

    /// Set the request body from raw bytes.
    #[must_use]
    pub fn body_bytes(mut self, body: impl Into<Bytes>) -> Self {
        if self.err.is_none() {
            self.body = Some(body.into());
        }
        self
    }

    /// Serialize a value to JSON and set it as the request body.
    ///
    /// On serialization failure the error is recorded and whatever bytes
    /// were produced (possibly none) still become the body; the failure
    /// surfaces from [`send`](Requester::send).
    #[must_use]
    pub fn body_json<T: serde::Serialize>(mut self, value: &T) -> Self {
        if self.err.is_some() {
            return self;
        }
        let bytes = match crate::to_json(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.err = Some(err);
                Bytes::new()
            }
        };
        self.body = Some(bytes);
        self
    }

    // ========================================================================
    // Handler registration
    // ========================================================================

    /// Assert that the response status equals `code`.
    #[must_use]
    pub fn expect_code(mut self, code: u16) -> Self {
        self.steps.push(Step::ExpectCode(code));
        self
    }

    /// Copy the response cookies into `dest`.
    ///
    /// Unparsable `Set-Cookie` headers are skipped.
    #[must_use]
    pub fn to_cookies(mut self, dest: &'dst mut Vec<Cookie>) -> Self {
        self.steps.push(Step::ToCookies(dest));
        self
    }

    /// JSON-decode the response body into `dest`.
    #[must_use]
    pub fn decode<T>(mut self, dest: &'dst mut T) -> Self
    where
        T: serde::de::DeserializeOwned + Send,
    {
        self.steps.push(Step::Decode(Box::new(move |response| {
            *dest = crate::from_json(response.body())?;
            Ok(())
        })));
        self
    }

    /// Copy the response body as UTF-8 text into `dest`.
    #[must_use]
    pub fn to_string(mut self, dest: &'dst mut String) -> Self {
        self.steps.push(Step::ToString(dest));
        self
    }

    /// Copy the raw response body bytes into `dest`.
    #[must_use]
    pub fn to_bytes(mut self, dest: &'dst mut Vec<u8>) -> Self {
        self.steps.push(Step::ToBytes(dest));
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL as configured.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header collection as configured.
    #[must_use]
    pub const fn headers_ref(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body as configured.
    #[must_use]
    pub const fn body_ref(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Pending configuration error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Execute the request and run the registered handlers.
    ///
    /// A pending configuration error is returned immediately without
    /// touching the transport. Transport failures are returned directly and
    /// no handler runs. After a successful exchange every handler runs in
    /// registration order and the last handler failure (if any) is returned.
    ///
    /// # Errors
    ///
    /// Returns the sticky configuration error, a transport error, or the
    /// aggregated handler error.
    pub async fn send(self) -> Result<()> {
        self.run(None).await
    }

    /// Execute the request, racing the transport against a cancellation
    /// token.
    ///
    /// Cancellation unblocks an in-flight exchange and reports
    /// [`Error::Canceled`]. Once the handler chain has begun it runs to
    /// completion; a token fired after the exchange no longer has any
    /// effect.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Requester::send), plus [`Error::Canceled`].
    pub async fn send_with_cancel(self, token: &CancellationToken) -> Result<()> {
        self.run(Some(token)).await
    }

    async fn run(self, cancel: Option<&CancellationToken>) -> Result<()> {
        let Self {
            method,
            url,
            headers,
            body,
            timeout,
            proxy,
            client,
            err,
            mut steps,
        } = self;

        if let Some(err) = err {
            return Err(err);
        }

        let url = Url::parse(&url)?;
        let span = span!(Level::INFO, "http_request", %method, %url);

        async move {
            let request = wire::Request::new(method, url, headers, body, timeout, proxy);
            debug!("sending request");

            let start = Instant::now();
            let outcome = match cancel {
                None => client.execute(request).await,
                Some(token) => {
                    tokio::select! {
                        biased;
                        outcome = client.execute(request) => outcome,
                        () = token.cancelled() => Err(Error::Canceled),
                    }
                }
            };
            // Saturating conversion to u64 (truncates after ~584 million years)
            let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            let response = match outcome {
                Ok(response) => {
                    info!(status = response.status(), elapsed_ms, "request completed");
                    response
                }
                Err(err) => {
                    warn!(error = %err, elapsed_ms, "request failed");
                    return Err(err);
                }
            };

            handler::run_steps(&mut steps, &response)
        }
        .instrument(span)
        .await
    }
}

impl<C> std::fmt::Debug for Requester<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requester")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("err", &self.err)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
