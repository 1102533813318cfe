//! Caller identity resolution.

use std::sync::Arc;

use crate::domain::{Identity, Role};
use crate::error::CollaboratorError;
use crate::ports::{ProfileStore, SessionProvider};

/// Resolves the caller's identity for one request: session subject first,
/// then the profile role keyed by subject id or email.
pub struct IdentityResolver {
    sessions: Arc<dyn SessionProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl IdentityResolver {
    pub fn new(sessions: Arc<dyn SessionProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { sessions, profiles }
    }

    /// Resolve the caller behind `session_token`.
    ///
    /// Absence of a session or profile is a valid outcome (anonymous, or
    /// the default role), never an error. `Err` means a collaborator failed
    /// and the caller's role could not be determined - the engine decides
    /// what that implies for the route at hand.
    pub async fn resolve(
        &self,
        session_token: Option<&str>,
    ) -> Result<Identity, CollaboratorError> {
        let Some(subject) = self.sessions.current_subject(session_token).await? else {
            return Ok(Identity::anonymous());
        };

        let role = self
            .profiles
            .find_role(&subject.id, &subject.email)
            .await?
            .unwrap_or(Role::User);

        tracing::debug!(subject = %subject.id, ?role, "resolved caller identity");

        Ok(Identity::authenticated(subject.id, subject.email, role))
    }
}
