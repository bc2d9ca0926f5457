//! HTTP client trait and the bundled reqwest-backed implementation.
//!
//! [`HttpClient`] is the transport seam: a [`Requester`](crate::Requester)
//! hands it one [`Request`] and gets back a buffered [`Response`] or an
//! error. [`ReqwestClient`] is the default collaborator; swap in anything
//! else with [`Requester::http_client`](crate::Requester::http_client).

use std::future::Future;

use crate::{ClientConfig, Error, Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations perform exactly one network exchange per call and must be
/// safe to share across builders.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the buffered response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid response
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

/// Default transport collaborator over [`reqwest`].
///
/// Connection pooling, TLS (rustls), and redirect handling come from the
/// underlying `reqwest::Client`; this type only maps between chela's request
/// and response shapes and reqwest's. The default configuration carries a
/// fixed 60-second request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestClient {
    /// Create a client with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        // Building a reqwest client only fails when the TLS backend cannot
        // be initialized, which is unrecoverable.
        #[allow(clippy::expect_used)]
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .expect("initialize HTTP client");
        Self { inner, config }
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// One-shot client routing through the given proxy.
    fn proxied(&self, proxy: &url::Url) -> Result<reqwest::Client> {
        let proxy = reqwest::Proxy::all(proxy.as_str())
            .map_err(|e| Error::invalid_request(e.to_string()))?;
        reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .proxy(proxy)
            .build()
            .map_err(|e| Error::invalid_request(e.to_string()))
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        let (method, url, headers, body, timeout, proxy) = request.into_parts();

        let client = match &proxy {
            Some(proxy) => self.proxied(proxy)?,
            None => self.inner.clone(),
        };

        let mut builder = client.request(method.into(), url).headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::connection(e.to_string()))?;

        Ok(Response::new(status, response_headers, body))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        return Error::Timeout;
    }

    let msg = err.to_string();
    if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
        return Error::tls(msg);
    }

    if err.is_connect() {
        return Error::connection(msg);
    }

    if err.is_builder() {
        return Error::invalid_request(msg);
    }

    Error::connection(msg)
}
