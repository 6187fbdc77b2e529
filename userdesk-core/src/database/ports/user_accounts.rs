use async_trait::async_trait;

use crate::domain::{FieldUpdate, NewUserRecord, UserRecord};
use crate::error::StoreResult;

/// Account table access used by the dispatcher and the listing endpoint.
///
/// Write methods return the affected-row count so callers can tell "no such
/// user" apart from success. Username uniqueness is the adapter's job.
#[async_trait]
pub trait UserAccountsRepository: Send + Sync {
    /// Insert a new account. A username collision surfaces as
    /// [`StoreError::UniqueViolation`](crate::error::StoreError::UniqueViolation).
    async fn insert_user(&self, user: &NewUserRecord) -> StoreResult<u64>;

    /// Overwrite one column on every account whose username equals
    /// `username` ignoring case.
    async fn update_field(
        &self,
        username: &str,
        update: &FieldUpdate,
    ) -> StoreResult<u64>;

    /// All accounts ordered by id.
    async fn list_users(&self) -> StoreResult<Vec<UserRecord>>;

    /// Cheap round-trip used by health checks and startup.
    async fn ping(&self) -> StoreResult<()>;
}
