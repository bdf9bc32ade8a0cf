//! The HTTP seam between request construction and response interpretation.
//!
//! [`Transport`] is the single point where the network is touched, kept
//! behind a trait so the client logic can be exercised against a mock
//! without any sockets. [`ReqwestTransport`] is the production
//! implementation over a blocking reqwest client.

use std::time::Duration;

use log::debug;
use mockall::automock;

use crate::hipchat::ErrorKind;
use crate::hipchat::request::{ApiRequest, Body, Method};

/// How long a single request may take end to end.
///
/// The transport performs exactly one attempt per request; a request that
/// outlives this window fails as [`ErrorKind::Transport`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A raw HTTP exchange result: status code plus the unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body; may be empty or non-JSON.
    pub body: String,
}

/// Executes one prepared [`ApiRequest`].
///
/// This trait abstracts the HTTP call for easier testing with mocks.
#[automock]
pub trait Transport {
    /// Issues exactly one HTTP request and returns the raw exchange.
    ///
    /// Connection-level failures (DNS, TLS, socket, timeout) are reported as
    /// [`ErrorKind::Transport`]; no retry is attempted.
    fn execute(&self, request: &ApiRequest) -> Result<HttpResponse, ErrorKind>;
}

/// Production [`Transport`] over a blocking reqwest client.
///
/// TLS certificates are always verified (reqwest's default; no insecure
/// mode is exposed) and every request carries an explicit timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates the transport with its own HTTP client.
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::new();
        ReqwestTransport { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &ApiRequest) -> Result<HttpResponse, ErrorKind> {
        debug!("request {:?} {}", request.method, request.url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        builder = builder.timeout(REQUEST_TIMEOUT).query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Form(pairs) => builder.form(pairs),
            Body::Json(document) => builder.body(document.to_string()),
        };

        let response = builder
            .send()
            .map_err(|e| ErrorKind::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ErrorKind::Transport(e.to_string()))?;

        debug!("response status {} from {}", status, request.url);

        Ok(HttpResponse { status, body })
    }
}
