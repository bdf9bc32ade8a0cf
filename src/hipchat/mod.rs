//! HipChat API integration.
//!
//! This module provides everything needed to talk to the HipChat HTTP API:
//! request construction, transport, response interpretation, and the public
//! [`HipchatClient`] operations.
//!
//! # Modules
//!
//! - `client` - The public operations: list rooms/users, find by name, send a message
//! - `message` - Outbound message payload with construct-time length clamps
//! - `request` - Operation descriptors and per-version request construction
//! - `response` - Mapping of HTTP status codes and JSON envelopes to logical results
//! - `structs` - Room and user records returned by the API
//! - `transport` - The HTTP seam: a mockable trait plus the reqwest implementation
//!
//! # API versions
//!
//! HipChat exposes two API generations with different authentication and
//! encoding conventions. v1 authenticates through an `auth_token` query
//! parameter and accepts form-encoded POST bodies; v2 authenticates through a
//! bearer-token header and accepts JSON bodies. [`ApiVersion`] captures the
//! distinction and every request is built for exactly one of the two.

use std::fmt;
use std::str::FromStr;

mod client;
mod message;
mod request;
mod response;
mod structs;
mod transport;

pub use crate::hipchat::client::HipchatClient;
pub use crate::hipchat::message::OutboundMessage;
pub use crate::hipchat::request::{ApiRequest, Body, Method, Operation};
pub use crate::hipchat::structs::{Room, User};
pub use crate::hipchat::transport::{HttpResponse, ReqwestTransport, Transport};
#[cfg(test)]
pub use crate::hipchat::transport::MockTransport;

/// Supported HipChat API generations.
///
/// Parsed from the configuration strings `"v1"` and `"v2"`; anything else is
/// rejected with [`ErrorKind::UnsupportedVersion`] before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Legacy API: query-string auth token, form-encoded POST bodies.
    V1,
    /// Current API: bearer-token header, JSON POST bodies.
    V2,
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "v1"),
            ApiVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(ApiVersion::V1),
            "v2" => Ok(ApiVersion::V2),
            other => Err(ErrorKind::UnsupportedVersion(other.to_owned())),
        }
    }
}

/// Authentication material for one API call.
///
/// Supplied per-call as an override, or resolved from the `hipchat`
/// configuration profile. Lives for a single call; nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// The HipChat API key.
    pub api_key: String,
    /// The API generation the key belongs to.
    pub api_version: ApiVersion,
}

/// Internal failure taxonomy.
///
/// Every variant is absorbed at the public operation boundary: the caller of
/// [`HipchatClient`] sees a flat `Option<T>` or `bool` while the kind is kept
/// for logging and tests.
///
/// # Variants
///
/// * `MissingCredential` - No explicit credential and the resolver yielded none
/// * `UnsupportedVersion` - An API version string other than `v1`/`v2`
/// * `Transport` - Connection-level failure (DNS, TLS, socket, timeout)
/// * `Http` - A response status other than 200/204
/// * `Decode` - Malformed JSON or a missing envelope key on the success path
/// * `NotFound` - A `find_*` lookup matched nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No API key or version available from either the caller or the resolver.
    MissingCredential,
    /// The given API version string is neither `v1` nor `v2`.
    UnsupportedVersion(String),
    /// The HTTP request could not be completed at the connection level.
    Transport(String),
    /// The API answered with a status other than 200 or 204.
    Http {
        /// The HTTP status code of the response.
        status: u16,
        /// The remote `error` message, when the response body carried one.
        message: Option<String>,
    },
    /// The success-path response body could not be decoded.
    Decode(String),
    /// No room or user with the requested name exists.
    NotFound(String),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::MissingCredential => {
                write!(f, "no HipChat api key or version found")
            }
            ErrorKind::UnsupportedVersion(version) => {
                write!(f, "unsupported HipChat API version `{}`", version)
            }
            ErrorKind::Transport(reason) => write!(f, "transport failure: {}", reason),
            ErrorKind::Http { status, message } => match message {
                Some(message) => write!(f, "HTTP {}: {}", status, message),
                None => write!(f, "HTTP {}", status),
            },
            ErrorKind::Decode(reason) => write!(f, "undecodable response: {}", reason),
            ErrorKind::NotFound(name) => write!(f, "no match for `{}`", name),
        }
    }
}
