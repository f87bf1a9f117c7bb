//! Success-envelope model shared by the campus client and its dev tooling.
//!
//! Every backend response body is wrapped as `{ "code", "data", "message" }`.
//! `code == 0` means success and `data` is the payload; anything else is an
//! application-level failure. This crate turns that numeric convention into
//! the tagged [`Outcome`] so callers match on it exhaustively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope `code` that marks a successful response.
pub const SUCCESS_CODE: i64 = 0;

/// Message surfaced when a failure envelope carries no usable `message`.
pub const FALLBACK_MESSAGE: &str = "Request failed, please try again later";

/// Error returned by [`decode`].
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The response body is not valid JSON.
    #[error("failed to decode envelope body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wire shape of a response body.
///
/// Fields are optional on the way in; a body missing `code` is still read so
/// that the failure can carry the original payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Status code; `0` is success.
    #[serde(default)]
    pub code: Option<i64>,
    /// Payload returned to the caller on success.
    #[serde(default)]
    pub data: Value,
    /// Human-readable message, usually only present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A non-success envelope.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("application error (code {}): {}", self.code_label(), self.display_message())]
pub struct ApplicationError {
    /// Numeric `code` from the body, if it had one.
    pub code: Option<i64>,
    /// Server-provided `message`, if any.
    pub message: Option<String>,
    /// The response body exactly as received.
    pub payload: Value,
}

impl ApplicationError {
    /// Message to show the user: the server message, or [`FALLBACK_MESSAGE`].
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(FALLBACK_MESSAGE)
    }

    fn code_label(&self) -> String {
        self.code.map_or_else(|| "missing".to_owned(), |code| code.to_string())
    }
}

/// Result of inspecting an envelope.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// `code == 0`; holds `data` unchanged.
    Success(Value),
    /// Any other code, or a body that is not an envelope at all.
    Failure(ApplicationError),
}

impl Outcome {
    /// Convert into a `Result`, success payload on the `Ok` side.
    ///
    /// # Errors
    ///
    /// Returns the [`ApplicationError`] for a failure outcome.
    pub fn into_result(self) -> Result<Value, ApplicationError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(err) => Err(err),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Classify a parsed response body.
#[must_use]
pub fn classify(payload: Value) -> Outcome {
    if !payload.is_object() {
        return Outcome::Failure(ApplicationError { code: None, message: None, payload });
    }

    let code = payload.get("code").and_then(Value::as_i64);
    if payload.get("code").is_some_and(is_success_code) {
        let data = payload.get("data").cloned().unwrap_or(Value::Null);
        return Outcome::Success(data);
    }

    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned);
    Outcome::Failure(ApplicationError { code, message, payload })
}

/// A numeric zero, integer or float. Strings never count.
fn is_success_code(code: &Value) -> bool {
    match code {
        Value::Number(number) => {
            number.as_i64() == Some(SUCCESS_CODE) || number.as_f64().is_some_and(|value| value.abs() < f64::EPSILON)
        }
        _ => false,
    }
}

/// Parse a raw body and classify it.
///
/// # Errors
///
/// Returns [`EnvelopeError::Json`] when `text` is not valid JSON.
pub fn decode(text: &str) -> Result<Outcome, EnvelopeError> {
    let payload = serde_json::from_str::<Value>(text)?;
    Ok(classify(payload))
}

/// Extract a `message` string from an arbitrary body, used for non-2xx
/// responses whose body may or may not be an envelope.
#[must_use]
pub fn message_of(text: &str) -> Option<String> {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) else {
        return None;
    };
    map.get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(ToOwned::to_owned)
}

impl Envelope {
    /// Render as a JSON body. `message` is omitted when absent.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("code".to_owned(), self.code.map_or(Value::Null, Value::from));
        map.insert("data".to_owned(), self.data);
        if let Some(message) = self.message {
            map.insert("message".to_owned(), Value::String(message));
        }
        Value::Object(map)
    }
}

/// Build a success envelope around `data`.
#[must_use]
pub fn success(data: Value) -> Value {
    Envelope { code: Some(SUCCESS_CODE), data, message: Some("ok".to_owned()) }.into_value()
}

/// Build a failure envelope with the given code and message.
#[must_use]
pub fn failure(code: i64, message: &str) -> Value {
    Envelope { code: Some(code), data: Value::Null, message: Some(message.to_owned()) }.into_value()
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
