//! In-memory profile store - used as fallback when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use vantage_core::domain::Role;
use vantage_core::error::CollaboratorError;
use vantage_core::ports::ProfileStore;

#[derive(Debug, Clone)]
struct ProfileRecord {
    subject_id: String,
    email: String,
    role: Role,
}

/// Profile store over a locked in-memory list.
///
/// Profile cardinality in this mode is tiny (seed data and tests), so a
/// linear scan per lookup is fine. Data is lost on process restart.
pub struct InMemoryProfileStore {
    records: RwLock<Vec<ProfileRecord>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub async fn insert(&self, subject_id: impl Into<String>, email: impl Into<String>, role: Role) {
        let mut records = self.records.write().await;
        records.push(ProfileRecord {
            subject_id: subject_id.into(),
            email: email.into(),
            role,
        });
    }
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find_role(&self, id: &str, email: &str) -> Result<Option<Role>, CollaboratorError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.subject_id == id || r.email == email)
            .map(|r| r.role))
    }
}
