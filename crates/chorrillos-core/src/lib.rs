pub mod config;
pub mod logging;

pub mod api;
pub mod coords;
pub mod error;
pub mod extract;
pub mod fetch_head;
pub mod geocode;
pub mod resolver;
pub mod url_model;

pub use coords::CoordinatePair;
pub use error::{FailureKind, ResolveError};
pub use resolver::{CoordinateResolver, Outcome, Resolution, UrlExpander};
