//! Member repository for database operations.

use sqlx::PgPool;

use cart_core::{Email, MemberId};

use super::{RepositoryError, corrupt};
use crate::models::Member;

/// Internal row type for `PostgreSQL` member queries.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i64,
    email: String,
    password: String,
}

impl TryFrom<MemberRow> for Member {
    type Error = RepositoryError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let email =
            Email::parse(&row.email).map_err(|e| corrupt("invalid email in database", e))?;

        Ok(Self::new(MemberId::new(row.id), email, row.password))
    }
}

/// Repository for member database operations.
pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new member repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a member by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Member>, RepositoryError> {
        let row = sqlx::query_as::<_, MemberRow>(
            "SELECT id, email, password FROM member WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Member::try_from).transpose()
    }
}
