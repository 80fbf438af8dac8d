//! Narrowing the registry down to the protocols for one run.

use crate::error::TrackerError;

use super::Protocol;

/// Selection applied to the loaded registry.
///
/// Both predicates are independent and applied in sequence: the id filter
/// first, then the no-token filter.
#[derive(Debug, Clone, Default)]
pub struct RegistryFilter {
    /// Keep only the protocol with this id.
    pub protocol_id: Option<String>,
    /// Keep only protocols that have not issued a token.
    pub no_token_only: bool,
}

impl RegistryFilter {
    /// Apply the filter, preserving registry order.
    ///
    /// An id that matches nothing is an error; an empty result from the
    /// no-token filter is not.
    pub fn apply(&self, protocols: Vec<Protocol>) -> Result<Vec<Protocol>, TrackerError> {
        let mut selected = protocols;

        if let Some(id) = &self.protocol_id {
            selected.retain(|p| &p.id == id);
            if selected.is_empty() {
                return Err(TrackerError::UnknownProtocol(id.clone()));
            }
        }

        if self.no_token_only {
            selected.retain(|p| !p.has_token());
        }

        tracing::debug!(count = selected.len(), "Selected protocols");
        Ok(selected)
    }
}
