//! Output helpers for the result tree.
//!
//! The engine itself is pure; these helpers turn a finished
//! [`ModuleResult`](crate::ModuleResult) into JSON for machine
//! consumers or a colored text summary for terminals. Full report
//! rendering (HTML tables, galleries) belongs to an external
//! collaborator that consumes the tree directly.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::format_module;
