//! Interpretation of raw HTTP exchanges into logical results.
//!
//! The API signals its outcome through a small set of conventions: a 200
//! wraps the payload in a per-operation envelope field, a 204 is a bare
//! success, and everything else is a failure whose body may carry an
//! `error` document. This module maps those conventions onto the internal
//! [`ErrorKind`] taxonomy.

use log::{debug, error};
use serde_json::Value;

use crate::hipchat::ErrorKind;
use crate::hipchat::request::ApiRequest;
use crate::hipchat::transport::HttpResponse;

/// Maps one HTTP exchange to a logical payload or an [`ErrorKind`].
///
/// * 200 - the body must be JSON; when `envelope` names a field, the payload
///   is extracted from it (a missing field or a malformed body is
///   [`ErrorKind::Decode`]). Operations without an envelope succeed on
///   status alone and yield no payload.
/// * 204 - unconditional success, no payload, no parse attempt.
/// * anything else - the request context and raw body are logged at debug
///   level, a remote `error` field (when the body happens to be JSON) at
///   error level, and the result is [`ErrorKind::Http`]. A non-JSON body on
///   this path is tolerated.
pub fn interpret(
    request: &ApiRequest,
    envelope: Option<&str>,
    response: HttpResponse,
) -> Result<Option<Value>, ErrorKind> {
    match response.status {
        200 => {
            let document: Value = serde_json::from_str(&response.body)
                .map_err(|e| ErrorKind::Decode(e.to_string()))?;
            match envelope {
                Some(key) => match document.get(key) {
                    Some(payload) => Ok(Some(payload.clone())),
                    None => Err(ErrorKind::Decode(format!(
                        "response has no `{}` field",
                        key
                    ))),
                },
                None => Ok(None),
            }
        }
        204 => Ok(None),
        status => {
            debug!("request url: {}", request.url);
            debug!("request query: {:?}", request.query);
            debug!("request body: {:?}", request.body);
            debug!("raw response: {}", response.body);

            let message = remote_error_message(&response.body);
            if let Some(message) = &message {
                error!("HipChat API error: {}", message);
            }

            Err(ErrorKind::Http { status, message })
        }
    }
}

/// Pulls a printable message out of a failure body's `error` field, if the
/// body is JSON at all. Must never fail itself.
fn remote_error_message(body: &str) -> Option<String> {
    let document: Value = serde_json::from_str(body).ok()?;
    let error = document.get("error")?;

    // v2 nests the text under `error.message`; fall back to the whole field.
    match error.get("message").and_then(Value::as_str) {
        Some(message) => Some(message.to_owned()),
        None => Some(error.to_string()),
    }
}
