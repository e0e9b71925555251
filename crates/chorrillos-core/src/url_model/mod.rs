//! URL modeling: input validation and map-provider host checks.
//!
//! `validate_input` is the gate in front of any network activity; the host
//! predicates are cheap string checks for forms that want to reject obviously
//! unrelated links before calling the resolver.

mod map_host;
mod validate;

pub use map_host::{is_shortened_map_url, is_valid_map_url, MAP_URL_PREFIXES, SHORT_LINK_PREFIXES};
pub use validate::validate_input;
