//! Outbound message payload for room notifications.
//!
//! The HipChat API enforces length limits on the sender name and message
//! text. Oversized input is sent truncated rather than rejected, so the
//! clamp happens here, silently, at construction time.

use serde_json::{Value, json};

/// Maximum length of the sender name, in characters.
const FROM_MAX_CHARS: usize = 15;
/// Maximum length of the message text, in characters.
const MESSAGE_MAX_CHARS: usize = 10_000;

/// A room notification, ready to be encoded for either API version.
///
/// `from` and `message` are clamped to the API limits when the value is
/// constructed; the clamp is silent and happens before any encoding.
/// `message_format` is always `text`.
///
/// [`OutboundMessage::to_json`] projects the v2 JSON body (where `notify`
/// stays a boolean); [`OutboundMessage::form_pairs`] projects the v1 form
/// encoding (where `notify` becomes `1`/`0`).
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// The target room id or room name; either works.
    pub room_id: String,
    /// Who the message is from, at most 15 characters.
    pub from: String,
    /// The message text, at most 10 000 characters.
    pub message: String,
    /// Rendering format; this crate only sends plain text.
    pub message_format: String,
    /// Background color for the message, e.g. `yellow` or `red`.
    pub color: String,
    /// Whether to trigger a room notification.
    pub notify: bool,
}

impl OutboundMessage {
    /// Builds a message, clamping `from` and `message` to the API limits.
    pub fn new(room_id: &str, message: &str, from: &str, color: &str, notify: bool) -> Self {
        OutboundMessage {
            room_id: room_id.to_owned(),
            from: clamp(from, FROM_MAX_CHARS),
            message: clamp(message, MESSAGE_MAX_CHARS),
            message_format: "text".to_owned(),
            color: color.to_owned(),
            notify,
        }
    }

    /// Projects the message as a v2 JSON document.
    ///
    /// The whole payload is sent, `room_id` included, even though the v2
    /// notification path already names the room. `notify` stays a literal
    /// JSON boolean.
    pub fn to_json(&self) -> Value {
        json!({
            "room_id": self.room_id,
            "from": self.from,
            "message": self.message,
            "message_format": self.message_format,
            "color": self.color,
            "notify": self.notify,
        })
    }

    /// Projects the message as v1 form pairs.
    ///
    /// v1 has no boolean type in its form encoding; `notify` is coerced to
    /// the integers `1`/`0`.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("room_id", self.room_id.clone()),
            ("from", self.from.clone()),
            ("message", self.message.clone()),
            ("message_format", self.message_format.clone()),
            ("color", self.color.clone()),
            ("notify", if self.notify { "1" } else { "0" }.to_owned()),
        ]
    }
}

/// Truncates on character boundaries; no error on oversize input.
fn clamp(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_from_and_message() {
        let from = "a".repeat(30);
        let message = "b".repeat(12_000);
        let outbound = OutboundMessage::new("Development Room", &message, &from, "yellow", false);

        assert_eq!(outbound.from.chars().count(), 15);
        assert_eq!(outbound.message.chars().count(), 10_000);
    }

    #[test]
    fn test_new_keeps_short_input_untouched() {
        let outbound = OutboundMessage::new("42", "Build is done", "Build Server", "green", true);

        assert_eq!(outbound.from, "Build Server");
        assert_eq!(outbound.message, "Build is done");
        assert_eq!(outbound.message_format, "text");
    }

    #[test]
    fn test_clamp_respects_char_boundaries() {
        // 20 multi-byte characters must clamp by character count, not bytes
        let from = "é".repeat(20);
        let outbound = OutboundMessage::new("0", "m", &from, "yellow", false);
        assert_eq!(outbound.from, "é".repeat(15));
    }

    #[test]
    fn test_form_pairs_coerces_notify_to_integer() {
        let on = OutboundMessage::new("0", "m", "f", "yellow", true);
        let off = OutboundMessage::new("0", "m", "f", "yellow", false);

        assert!(on.form_pairs().contains(&("notify", "1".to_owned())));
        assert!(off.form_pairs().contains(&("notify", "0".to_owned())));
    }

    #[test]
    fn test_json_keeps_notify_boolean() {
        let outbound = OutboundMessage::new("0", "m", "f", "yellow", true);
        let json = outbound.to_json().to_string();

        assert!(json.contains(r#""notify":true"#));
        assert!(!json.contains(r#""notify":1"#));
    }
}
