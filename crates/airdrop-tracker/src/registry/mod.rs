//! Protocol registry.
//!
//! Reads the tracked protocol list from `protocols.json` and narrows it
//! down for a run.

mod filter;
mod protocol;

pub use filter::RegistryFilter;
pub use protocol::{Protocol, Registry};
