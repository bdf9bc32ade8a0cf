//! Room and user records returned by the HipChat API.
//!
//! The API returns rooms and users as JSON objects whose exact shape differs
//! between v1 and v2 (and between server releases). This module only commits
//! to the one field the crate actually reads, `name`, and carries everything
//! else opaquely so callers can still reach the raw attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A HipChat room.
///
/// Only `name` is interpreted (it drives [`find_room`]); all remaining
/// attributes are preserved as-is under [`Room::extra`].
///
/// [`find_room`]: crate::hipchat::HipchatClient::find_room
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Room {
    /// Room display name, matched exactly by `find_room`.
    pub name: String,
    /// Every other attribute the API returned, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "room name={}", self.name)
    }
}

/// A HipChat user.
///
/// Same contract as [`Room`]: `name` is interpreted, the rest is opaque.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    /// User display name, matched exactly by `find_user`.
    pub name: String,
    /// Every other attribute the API returned, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "user name={}", self.name)
    }
}
