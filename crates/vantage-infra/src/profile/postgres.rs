//! PostgreSQL profile store.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DbConn, EntityTrait, QueryFilter};

use vantage_core::domain::Role;
use vantage_core::error::CollaboratorError;
use vantage_core::ports::ProfileStore;

use crate::database::entity::profile::{self, Entity as ProfileEntity};

/// Profile store backed by the main relational database.
///
/// The id-or-email match is a single OR-filtered query, so both fields are
/// evaluated against one snapshot of the row instead of two sequential
/// lookups that could disagree under concurrent profile updates.
pub struct PostgresProfileStore {
    db: DbConn,
    query_timeout: Duration,
}

impl PostgresProfileStore {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            query_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }
}

fn role_from_str(raw: &str) -> Role {
    match raw {
        "admin" => Role::Admin,
        "expert" => Role::Expert,
        "user" => Role::User,
        other => {
            tracing::warn!(role = other, "unknown profile role; defaulting to user");
            Role::User
        }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn find_role(&self, id: &str, email: &str) -> Result<Option<Role>, CollaboratorError> {
        let query = ProfileEntity::find()
            .filter(
                Condition::any()
                    .add(profile::Column::SubjectId.eq(id))
                    .add(profile::Column::Email.eq(email)),
            )
            .one(&self.db);

        let result = tokio::time::timeout(self.query_timeout, query)
            .await
            .map_err(|_| CollaboratorError::Timeout(self.query_timeout))?
            .map_err(|e| CollaboratorError::Unavailable(e.to_string()))?;

        Ok(result.map(|model| role_from_str(&model.role)))
    }
}
