//! Snapshot storage.
//!
//! One run produces one JSON snapshot of every selected protocol.

mod snapshot;

pub use snapshot::{ProtocolResult, Snapshot};
