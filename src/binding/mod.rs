//! Schema-driven value binding
//!
//! Materializes display-ready values from a schema plus a resolved domain
//! object or a plain mapping. Used for form rendering, outside the
//! validator chain.

mod form;
mod lookup;
mod resolver;
mod value;

pub use form::{bind, Form, FormBinder};
pub use lookup::{Attributes, Lookup, Target};
pub use resolver::{default_value, resolve};
pub use value::{ResolvedValue, ValueObject};
