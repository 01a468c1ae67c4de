//! Request validation
//!
//! Composable validators run as named chains against one request. Each
//! run produces a [`ValidationContext`] holding either the bound values or
//! the field errors and terminal status to send back.

mod chain;
mod context;
mod errors;
mod request;
mod response;
mod validators;

pub use chain::{run_validator_chain, with_session_model, ChainRegistry, ValidatorChain};
pub use context::{keys, Bound, Coordinates, ErrorLocation, FieldError, ValidationContext};
pub use errors::{ChainError, ChainResult};
pub use request::{Services, ValidationRequest};
pub use response::{ErrorResponse, ValidationFailure};
pub use validators::{
    ensure_model, require_coordinates, require_filename, require_location_config,
    require_location_wizard, require_map, require_model, require_new_location_path,
    require_uploaded_file, require_wind, resolve_session, session_model, Validate, Validator,
};
