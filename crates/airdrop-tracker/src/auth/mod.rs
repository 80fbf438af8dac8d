//! Credential handling for X API access.

mod credential;

pub use credential::{Credential, BEARER_TOKEN_VAR};
