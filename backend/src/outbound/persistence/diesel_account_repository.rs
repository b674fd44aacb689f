//! PostgreSQL-backed `AccountRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, PasswordDigest, UserId};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    map_basic_pool_error(error, AccountRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    match unique_violation_constraint(&error) {
        Some(USERNAME_CONSTRAINT) => return AccountRepositoryError::duplicate("username"),
        Some(EMAIL_CONSTRAINT) => return AccountRepositoryError::duplicate("email"),
        Some(other) => warn!(constraint = other, "unexpected unique violation on users"),
        None => {}
    }
    map_basic_diesel_error(
        error,
        AccountRepositoryError::query,
        AccountRepositoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<Account, AccountRepositoryError> {
    let password_digest = PasswordDigest::parse(&row.password_digest)
        .map_err(|err| AccountRepositoryError::query(err.to_string()))?;
    Ok(Account {
        id: UserId::from_uuid(row.id),
        username: row.username,
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        password_digest,
        created_at: row.created_at,
    })
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *account.id.as_uuid(),
            username: &account.username,
            email: &account.email,
            first_name: &account.first_name,
            last_name: &account.last_name,
            password_digest: account.password_digest.encode(),
            created_at: account.created_at,
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_account).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    #[derive(Debug)]
    struct ConstraintInfo(&'static str);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    #[case::username(USERNAME_CONSTRAINT, "username")]
    #[case::email(EMAIL_CONSTRAINT, "email")]
    fn unique_violations_name_the_field(#[case] constraint: &'static str, #[case] field: &str) {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo(constraint)),
        );
        assert_eq!(map_diesel_error(error), AccountRepositoryError::duplicate(field));
    }

    #[rstest]
    fn unrelated_unique_violation_is_a_query_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintInfo("users_pkey")),
        );
        assert!(matches!(
            map_diesel_error(error),
            AccountRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn row_with_malformed_digest_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password_digest: "plaintext".into(),
            created_at: Utc::now(),
        };
        assert!(row_to_account(row).is_err());
    }

    #[rstest]
    fn row_round_trips_digest() {
        let digest = PasswordDigest::derive("Analytical1!");
        let row = UserRow {
            id: Uuid::new_v4(),
            username: "ada".into(),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password_digest: digest.encode(),
            created_at: Utc::now(),
        };
        let account = row_to_account(row).expect("valid row");
        assert!(account.password_digest.verify("Analytical1!"));
    }
}
