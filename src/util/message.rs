//! Messages for the JavaScript client
//!
//! The client shows any `message` object with a `type` and `text` that it
//! finds in a JSON response after a form submit.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Create a message of the given type
pub fn make_message(kind: impl Into<String>, text: impl Into<String>) -> Message {
    Message {
        kind: kind.into(),
        text: text.into(),
    }
}

/// Payload returned when the session's model has gone away
pub fn missing_model_error() -> Value {
    json!({
        "error": true,
        "message": make_message("error", "That model is no longer available."),
    })
}

/// URL path of an image generated for a model run
pub fn model_image_url(images_url_path: &str, model_id: &str, filename: &str) -> String {
    format!(
        "/static/{}/{}/{}",
        images_url_path.trim_matches('/'),
        model_id,
        filename.trim_start_matches('/')
    )
}
