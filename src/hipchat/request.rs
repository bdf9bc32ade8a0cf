//! Request construction for the HipChat API.
//!
//! Each logical operation maps, per API version, to a static descriptor: the
//! request path template and the envelope key under which the response body
//! carries the payload. [`build`] turns an operation, a credential, and an
//! optional outbound message into a fully described [`ApiRequest`] (URL,
//! headers, query parameters, and body) without touching the network.
//!
//! The two API generations differ in authentication and encoding:
//!
//! | | auth | POST body |
//! |---|---|---|
//! | v1 | `auth_token` + `format=json` query parameters | form-encoded, `notify` as `1`/`0` |
//! | v2 | `Authorization: Bearer` header | JSON, `notify` as a boolean |

use crate::hipchat::message::OutboundMessage;
use crate::hipchat::{ApiVersion, Credential};

/// Default room id interpolated into the v2 notification path when the
/// caller supplied none.
const DEFAULT_ROOM_ID: &str = "0";

/// The logical API operations this crate performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Fetch the room list.
    Rooms,
    /// Fetch the user list.
    Users,
    /// Post a notification to a room.
    Message,
}

impl Operation {
    /// The request path for this operation under the given version.
    ///
    /// Only the v2 message path is parameterized: it interpolates the target
    /// room id. Every other entry is static.
    pub fn path(self, version: ApiVersion, room_id: &str) -> String {
        match (version, self) {
            (ApiVersion::V1, Operation::Rooms) => "rooms/list".to_owned(),
            (ApiVersion::V1, Operation::Users) => "users/list".to_owned(),
            (ApiVersion::V1, Operation::Message) => "rooms/message".to_owned(),
            (ApiVersion::V2, Operation::Rooms) => "room".to_owned(),
            (ApiVersion::V2, Operation::Users) => "user".to_owned(),
            (ApiVersion::V2, Operation::Message) => {
                format!("room/{}/notification", room_id)
            }
        }
    }

    /// The response envelope key for this operation under the given version.
    ///
    /// `None` means the response carries no payload of interest and success
    /// is signaled by the status code alone (the v2 notification endpoint
    /// answers 204 with an empty body).
    pub fn envelope(self, version: ApiVersion) -> Option<&'static str> {
        match (version, self) {
            (ApiVersion::V1, Operation::Rooms) => Some("rooms"),
            (ApiVersion::V1, Operation::Users) => Some("users"),
            (ApiVersion::V1, Operation::Message) => Some("status"),
            (ApiVersion::V2, Operation::Rooms) => Some("items"),
            (ApiVersion::V2, Operation::Users) => Some("items"),
            (ApiVersion::V2, Operation::Message) => None,
        }
    }
}

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// No body (all GET requests).
    Empty,
    /// v1 form encoding.
    Form(Vec<(&'static str, String)>),
    /// v2 JSON document.
    Json(serde_json::Value),
}

/// A fully described API request, ready for a [`Transport`] to execute.
///
/// [`Transport`]: crate::hipchat::Transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub query: Vec<(&'static str, String)>,
    pub body: Body,
}

/// Builds the request for `operation` under the credential's API version.
///
/// `message` is only consulted for the message operation: its `room_id` is
/// interpolated into the v2 path (defaulting to `"0"` when empty) and its
/// payload becomes the POST body in the version's encoding. No network
/// activity happens here.
pub fn build(
    base_url: &str,
    operation: Operation,
    credential: &Credential,
    method: Method,
    message: Option<&OutboundMessage>,
) -> ApiRequest {
    let room_id = message
        .map(|m| m.room_id.as_str())
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_ROOM_ID);

    let version = credential.api_version;
    let path = operation.path(version, room_id);
    let url = format!("{}/{}/{}", base_url, version, path);

    let mut headers = Vec::new();
    let mut query = Vec::new();
    let mut body = Body::Empty;

    match version {
        ApiVersion::V1 => {
            query.push(("format", "json".to_owned()));
            query.push(("auth_token", credential.api_key.clone()));
            if method == Method::Post {
                if let Some(message) = message {
                    body = Body::Form(message.form_pairs());
                }
            }
        }
        ApiVersion::V2 => {
            headers.push(("Authorization", format!("Bearer {}", credential.api_key)));
            if method == Method::Post {
                if let Some(message) = message {
                    headers.push(("Content-Type", "application/json".to_owned()));
                    body = Body::Json(message.to_json());
                }
            }
        }
    }

    ApiRequest {
        method,
        url,
        headers,
        query,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.hipchat.com";

    fn credential(version: ApiVersion) -> Credential {
        Credential {
            api_key: "peWcBiMOS9HrZG15".to_owned(),
            api_version: version,
        }
    }

    #[test]
    fn test_v1_paths() {
        let cred = credential(ApiVersion::V1);
        let cases = [
            (Operation::Rooms, "https://api.hipchat.com/v1/rooms/list"),
            (Operation::Users, "https://api.hipchat.com/v1/users/list"),
            (Operation::Message, "https://api.hipchat.com/v1/rooms/message"),
        ];

        for (operation, expected) in cases {
            let request = build(BASE, operation, &cred, Method::Get, None);
            assert_eq!(request.url, expected);
        }
    }

    #[test]
    fn test_v2_paths() {
        let cred = credential(ApiVersion::V2);

        let request = build(BASE, Operation::Rooms, &cred, Method::Get, None);
        assert_eq!(request.url, "https://api.hipchat.com/v2/room");

        let request = build(BASE, Operation::Users, &cred, Method::Get, None);
        assert_eq!(request.url, "https://api.hipchat.com/v2/user");
    }

    #[test]
    fn test_v2_message_path_interpolates_room_id() {
        let cred = credential(ApiVersion::V2);
        let message = OutboundMessage::new("1234", "hello", "bot", "yellow", false);

        let request = build(BASE, Operation::Message, &cred, Method::Post, Some(&message));
        assert_eq!(
            request.url,
            "https://api.hipchat.com/v2/room/1234/notification"
        );
    }

    #[test]
    fn test_v2_message_path_defaults_room_id() {
        let cred = credential(ApiVersion::V2);

        // No message at all
        let request = build(BASE, Operation::Message, &cred, Method::Post, None);
        assert_eq!(request.url, "https://api.hipchat.com/v2/room/0/notification");

        // Message with an empty room id
        let message = OutboundMessage::new("", "hello", "bot", "yellow", false);
        let request = build(BASE, Operation::Message, &cred, Method::Post, Some(&message));
        assert_eq!(request.url, "https://api.hipchat.com/v2/room/0/notification");
    }

    #[test]
    fn test_v1_auth_is_query_parameters() {
        let cred = credential(ApiVersion::V1);
        let request = build(BASE, Operation::Rooms, &cred, Method::Get, None);

        assert!(request.query.contains(&("format", "json".to_owned())));
        assert!(
            request
                .query
                .contains(&("auth_token", "peWcBiMOS9HrZG15".to_owned()))
        );
        assert!(request.headers.is_empty());
        assert_eq!(request.body, Body::Empty);
    }

    #[test]
    fn test_v2_auth_is_bearer_header() {
        let cred = credential(ApiVersion::V2);
        let request = build(BASE, Operation::Rooms, &cred, Method::Get, None);

        assert!(
            request
                .headers
                .contains(&("Authorization", "Bearer peWcBiMOS9HrZG15".to_owned()))
        );
        assert!(request.query.is_empty());
        assert_eq!(request.body, Body::Empty);
    }

    #[test]
    fn test_v1_post_body_is_form_with_integer_notify() {
        let cred = credential(ApiVersion::V1);
        let message = OutboundMessage::new("42", "Build is done", "Build Server", "red", true);

        let request = build(BASE, Operation::Message, &cred, Method::Post, Some(&message));
        match request.body {
            Body::Form(pairs) => {
                assert!(pairs.contains(&("notify", "1".to_owned())));
                assert!(pairs.contains(&("room_id", "42".to_owned())));
            }
            other => panic!("expected form body, got {:?}", other),
        }
    }

    #[test]
    fn test_v2_post_body_is_json_with_boolean_notify() {
        let cred = credential(ApiVersion::V2);
        let message = OutboundMessage::new("42", "Build is done", "Build Server", "red", false);

        let request = build(BASE, Operation::Message, &cred, Method::Post, Some(&message));
        match request.body {
            Body::Json(document) => {
                assert_eq!(document["notify"], serde_json::Value::Bool(false));
                assert_eq!(document["from"], "Build Server");
            }
            other => panic!("expected json body, got {:?}", other),
        }
        assert!(
            request
                .headers
                .contains(&("Content-Type", "application/json".to_owned()))
        );
    }

    #[test]
    fn test_clamped_lengths_reach_the_body() {
        let cred = credential(ApiVersion::V2);
        let message = OutboundMessage::new("42", &"b".repeat(12_000), &"a".repeat(30), "red", false);

        let request = build(BASE, Operation::Message, &cred, Method::Post, Some(&message));
        match request.body {
            Body::Json(document) => {
                assert_eq!(document["from"].as_str().unwrap().chars().count(), 15);
                assert_eq!(document["message"].as_str().unwrap().chars().count(), 10_000);
            }
            other => panic!("expected json body, got {:?}", other),
        }
    }
}
