//! The public HipChat operations.
//!
//! [`HipchatClient`] composes the request builder, a [`Transport`], and the
//! response interpreter into the five operations the crate exposes: list
//! rooms, list users, find a room or user by name, and send a message.
//!
//! # Failure contract
//!
//! Internally every step reports a precise [`ErrorKind`]; none of it crosses
//! the public boundary. Each operation absorbs the kind into a log entry and
//! a flat negative result (`None` or `false`), so callers only ever ask "did
//! it work". A lookup miss in `find_*` is the one non-fault negative: it is
//! logged at debug level, not as an error.

use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ConfigResolver, NAMESPACE};
use crate::hipchat::message::OutboundMessage;
use crate::hipchat::request::{self, Method, Operation};
use crate::hipchat::response::interpret;
use crate::hipchat::structs::{Room, User};
use crate::hipchat::transport::{ReqwestTransport, Transport};
use crate::hipchat::{Credential, ErrorKind};

/// Production API host.
const API_URL: &str = "https://api.hipchat.com";

/// HipChat API client.
///
/// Generic over its [`Transport`] and [`ConfigResolver`] so both seams can
/// be replaced in tests; production code uses [`HipchatClient::new`], which
/// wires in the reqwest transport and targets the real API host.
///
/// Every operation takes an optional [`Credential`]. When given, it is used
/// as-is; when absent, the resolver's `hipchat` profile supplies the key and
/// version. A call never mutates the client, so one instance can serve any
/// number of calls.
///
/// # Examples
///
/// ```no_run
/// use hipchat::{FigmentResolver, HipchatClient};
///
/// let resolver = FigmentResolver::from_file("hipchat.yaml");
/// let client = HipchatClient::new(resolver);
///
/// if client.send_message("Development Room", "Build is done", "Build Server", "green", false, None) {
///     println!("sent");
/// }
/// ```
pub struct HipchatClient<T: Transport, R: ConfigResolver> {
    /// API host, without a trailing slash.
    base_url: String,
    /// The HTTP seam.
    transport: T,
    /// Fallback credential source.
    resolver: R,
}

impl<R: ConfigResolver> HipchatClient<ReqwestTransport, R> {
    /// Creates a client against the production API host.
    pub fn new(resolver: R) -> Self {
        HipchatClient::with_transport(API_URL, ReqwestTransport::new(), resolver)
    }
}

impl<T: Transport, R: ConfigResolver> HipchatClient<T, R> {
    /// Creates a client with an explicit host and transport.
    pub fn with_transport(base_url: &str, transport: T, resolver: R) -> Self {
        HipchatClient {
            base_url: base_url.trim_end_matches('/').to_owned(),
            transport,
            resolver,
        }
    }

    /// List all HipChat rooms.
    pub fn list_rooms(&self, credential: Option<&Credential>) -> Option<Vec<Room>> {
        info!("request room list");
        absorb("list_rooms", self.fetch_list(Operation::Rooms, credential))
    }

    /// List all HipChat users.
    pub fn list_users(&self, credential: Option<&Credential>) -> Option<Vec<User>> {
        info!("request user list");
        absorb("list_users", self.fetch_list(Operation::Users, credential))
    }

    /// Find a room by exact name.
    ///
    /// Fetches the room list and scans it in returned order; the first exact
    /// match wins. No case folding, no dedup.
    pub fn find_room(&self, name: &str, credential: Option<&Credential>) -> Option<Room> {
        info!("look up room `{}`", name);
        let result = self
            .fetch_list::<Room>(Operation::Rooms, credential)
            .and_then(|rooms| {
                rooms
                    .into_iter()
                    .find(|room| room.name == name)
                    .ok_or_else(|| ErrorKind::NotFound(name.to_owned()))
            });
        absorb("find_room", result)
    }

    /// Find a user by exact name.
    ///
    /// Same contract as [`HipchatClient::find_room`].
    pub fn find_user(&self, name: &str, credential: Option<&Credential>) -> Option<User> {
        info!("look up user `{}`", name);
        let result = self
            .fetch_list::<User>(Operation::Users, credential)
            .and_then(|users| {
                users
                    .into_iter()
                    .find(|user| user.name == name)
                    .ok_or_else(|| ErrorKind::NotFound(name.to_owned()))
            });
        absorb("find_user", result)
    }

    /// Send a message to a room.
    ///
    /// `room_id` may be a numeric id or a room name; either works. `from`
    /// and `message` are silently clamped to the API limits (15 and 10 000
    /// characters). Returns whether the message was accepted.
    pub fn send_message(
        &self,
        room_id: &str,
        message: &str,
        from: &str,
        color: &str,
        notify: bool,
        credential: Option<&Credential>,
    ) -> bool {
        info!("send message to room `{}`", room_id);
        let outbound = OutboundMessage::new(room_id, message, from, color, notify);
        let result = self.query(Operation::Message, Method::Post, Some(&outbound), credential);
        absorb("send_message", result).is_some()
    }

    /// Resolves the credential for one call: explicit override first, then
    /// the configuration profile. Fails before any request is built.
    fn credential(&self, explicit: Option<&Credential>) -> Result<Credential, ErrorKind> {
        if let Some(credential) = explicit {
            return Ok(credential.clone());
        }

        let profile = self
            .resolver
            .profile(NAMESPACE)
            .ok_or(ErrorKind::MissingCredential)?;
        let api_key = profile.api_key.ok_or(ErrorKind::MissingCredential)?;
        let api_version = profile
            .api_version
            .ok_or(ErrorKind::MissingCredential)?
            .parse()?;

        Ok(Credential {
            api_key,
            api_version,
        })
    }

    /// One full round trip: resolve credential, build, execute, interpret.
    fn query(
        &self,
        operation: Operation,
        method: Method,
        message: Option<&OutboundMessage>,
        credential: Option<&Credential>,
    ) -> Result<Option<Value>, ErrorKind> {
        let credential = self.credential(credential)?;
        let request = request::build(&self.base_url, operation, &credential, method, message);
        debug!("query {} with {:?}", request.url, request.query);

        let response = self.transport.execute(&request)?;
        interpret(&request, operation.envelope(credential.api_version), response)
    }

    /// GETs a list operation and decodes its envelope payload.
    ///
    /// A payload-less success (a 204) reads as an empty list.
    fn fetch_list<P: DeserializeOwned>(
        &self,
        operation: Operation,
        credential: Option<&Credential>,
    ) -> Result<Vec<P>, ErrorKind> {
        let payload = match self.query(operation, Method::Get, None, credential)? {
            Some(payload) => payload,
            None => return Ok(Vec::new()),
        };
        serde_json::from_value(payload).map_err(|e| ErrorKind::Decode(e.to_string()))
    }
}

/// Flattens an internal result at the public boundary, logging the kind.
fn absorb<V>(operation: &str, result: Result<V, ErrorKind>) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(ErrorKind::NotFound(name)) => {
            debug!("{}: no match for `{}`", operation, name);
            None
        }
        Err(kind) => {
            error!("{} failed: {}", operation, kind);
            None
        }
    }
}
