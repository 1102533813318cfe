//! Profile store port.

use async_trait::async_trait;

use crate::domain::Role;
use crate::error::CollaboratorError;

/// Profile store collaborator. Read-only from the gateway's perspective.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up the role for a subject, matching by id or by email as a
    /// single query (accounts may predate the id/email link, so either
    /// field matching counts).
    ///
    /// `Ok(None)` means no profile exists; callers default the role.
    async fn find_role(&self, id: &str, email: &str) -> Result<Option<Role>, CollaboratorError>;
}
