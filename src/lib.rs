//! HipChat outbound integration.
//!
//! This crate authenticates to the HipChat HTTP API and exposes five
//! operations: list rooms, list users, find a room or user by exact name,
//! and send a message to a room. Each operation is a single synchronous
//! HTTPS round trip; there is no retry logic, no local state, and no
//! background work.
//!
//! # Overview
//!
//! HipChat has two API generations. v1 authenticates through query
//! parameters and accepts form-encoded bodies; v2 authenticates through a
//! bearer-token header and accepts JSON bodies. The crate speaks both,
//! dispatching on the [`ApiVersion`] carried by the call's credential.
//!
//! Credentials come from either an explicit per-call [`Credential`] or a
//! configuration profile (YAML file plus `HIPCHAT_*` environment variables)
//! resolved through the [`config`] module.
//!
//! # Failure contract
//!
//! Operations never surface an error type: every internal failure (missing
//! credential, unsupported version, connection trouble, HTTP error status,
//! undecodable body, lookup miss) is logged and flattened to `None` or
//! `false`. Callers branch on "did it work", nothing else.
//!
//! # Examples
//!
//! ```no_run
//! use hipchat::{FigmentResolver, HipchatClient};
//!
//! let resolver = FigmentResolver::from_file("hipchat.yaml");
//! let client = HipchatClient::new(resolver);
//!
//! if let Some(rooms) = client.list_rooms(None) {
//!     for room in rooms {
//!         println!("{}", room);
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Profile resolution (YAML file + environment variables)
//! - [`hipchat`] - Request construction, transport, interpretation, and the client

pub mod config;
pub mod hipchat;

pub use crate::config::{ConfigResolver, FigmentResolver, Profile};
pub use crate::hipchat::{ApiVersion, Credential, HipchatClient, Room, User};
