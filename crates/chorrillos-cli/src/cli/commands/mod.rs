//! CLI command handlers, one file per command.

mod check;
mod completions;
mod geocode;
mod resolve;
mod serve;

pub use check::run_check;
pub use completions::run_completions;
pub use geocode::{run_reverse, run_search};
pub use resolve::run_resolve;
pub use serve::run_serve;
