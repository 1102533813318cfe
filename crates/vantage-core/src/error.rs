//! Gateway-level error types.

use std::time::Duration;

use thiserror::Error;

/// Failure of an external collaborator (identity provider or profile store).
///
/// Absence of a session or profile is never reported through this type -
/// those are expected outcomes. This covers the collaborator itself being
/// unreachable or too slow, which on restricted routes resolves to
/// deny-by-default.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("collaborator call timed out after {0:?}")]
    Timeout(Duration),
}
