use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::debug;

use crate::database::ports::user_accounts::UserAccountsRepository;
use crate::domain::{FieldUpdate, NewUserRecord, UserRecord};
use crate::error::{StoreError, StoreResult};

/// PostgreSQL-backed implementation of the `UserAccountsRepository` port.
///
/// Expects a `users` table with a case-insensitive unique index on
/// `LOWER(username)`; the service never creates or migrates it.
#[derive(Clone, Debug)]
pub struct PostgresUserAccountsRepository {
    pool: PgPool,
}

impl PostgresUserAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error()
        && db_err.is_unique_violation()
    {
        return StoreError::UniqueViolation {
            constraint: db_err.constraint().map(str::to_owned),
            message: err.to_string(),
        };
    }
    StoreError::Database(err.to_string())
}

fn record_from_row(row: &PgRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        is_blocked: row.try_get("is_blocked")?,
        renewal_date: row.try_get("renewal_date")?,
        ip: row.try_get("ip")?,
        indicacao: row.try_get("indicacao")?,
    })
}

#[async_trait]
impl UserAccountsRepository for PostgresUserAccountsRepository {
    async fn insert_user(&self, user: &NewUserRecord) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, is_blocked, renewal_date, indicacao)
            VALUES ($1, $2, false, $3, 0)
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.renewal_date)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn update_field(
        &self,
        username: &str,
        update: &FieldUpdate,
    ) -> StoreResult<u64> {
        let query = match update {
            FieldUpdate::Password(password) => sqlx::query(
                "UPDATE users SET password = $1 WHERE LOWER(username) = LOWER($2)",
            )
            .bind(password),
            FieldUpdate::Blocked(blocked) => sqlx::query(
                "UPDATE users SET is_blocked = $1 WHERE LOWER(username) = LOWER($2)",
            )
            .bind(*blocked),
            FieldUpdate::RenewalDate(date) => sqlx::query(
                "UPDATE users SET renewal_date = $1 WHERE LOWER(username) = LOWER($2)",
            )
            .bind(date),
            FieldUpdate::ReferralCount(count) => sqlx::query(
                "UPDATE users SET indicacao = $1 WHERE LOWER(username) = LOWER($2)",
            )
            .bind(*count),
            FieldUpdate::Ip(ip) => sqlx::query(
                "UPDATE users SET ip = $1 WHERE LOWER(username) = LOWER($2)",
            )
            .bind(ip),
        };

        let result = query
            .bind(username)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        debug!(
            column = update.column(),
            affected_rows = result.rows_affected(),
            "user column updated"
        );
        Ok(result.rows_affected())
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id::bigint AS id, username, is_blocked, renewal_date, ip, indicacao
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.iter()
            .map(record_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_sqlx_error)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
