//! Small helpers shared by the web layer and the CLI.

pub mod dates;
pub mod direction;
pub mod keys;
pub mod message;

pub use dates::{encode_date, encode_datetime, parse_datetime, runtime_stamp, to_json, JsonDate};
pub use direction::DirectionConverter;
pub use keys::delete_keys;
pub use message::{make_message, missing_model_error, model_image_url, Message};
