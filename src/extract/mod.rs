//! Locating and decoding the data blocks inside a fetched response body.

pub mod html;
pub mod unescape;

pub use html::ScriptBlocks;

use serde::de::DeserializeOwned;
use std::borrow::Cow;
use tracing::warn;

use crate::error::{PitchsideError, Result};

/// Decode a JSON API response body as a whole
pub fn decode_json<T: DeserializeOwned>(body: &[u8], match_id: &str, context: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| PitchsideError::format(match_id, context, e))
}

/// Response bodies are decoded leniently; invalid UTF-8 becomes U+FFFD and
/// is reported once per body.
pub fn body_text<'a>(body: &'a [u8], match_id: &str) -> Cow<'a, str> {
    let text = String::from_utf8_lossy(body);
    if let Cow::Owned(_) = text {
        warn!(match_id, bytes = body.len(), "response body is not valid UTF-8, invalid bytes replaced");
    }
    text
}
