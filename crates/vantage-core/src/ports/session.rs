//! Identity provider port.

use async_trait::async_trait;

use crate::error::CollaboratorError;

/// Validated session principal, before any role resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: String,
    pub email: String,
}

/// Identity provider collaborator.
///
/// The gateway never issues, refreshes, or stores tokens - it only asks who
/// the current caller is.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Validate the request's session token, if any.
    ///
    /// `Ok(None)` means there is no valid session - an expected outcome,
    /// not a failure. `Err` is reserved for the provider itself being
    /// unreachable.
    async fn current_subject(
        &self,
        token: Option<&str>,
    ) -> Result<Option<Subject>, CollaboratorError>;
}
