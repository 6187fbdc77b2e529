use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::database::ports::user_accounts::UserAccountsRepository;
use crate::domain::{FieldUpdate, NewUserRecord, UserRecord};
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct StoredUser {
    record: UserRecord,
    password: String,
}

#[derive(Debug, Default)]
struct TableState {
    rows: Vec<StoredUser>,
    next_id: i64,
    unavailable: Option<String>,
}

/// In-memory stand-in for the `users` table.
///
/// Mirrors the PostgreSQL adapter: case-insensitive unique usernames,
/// case-insensitive `WHERE` matching, ids assigned in insertion order.
/// Every trait call is counted so tests can assert the store was never
/// reached.
#[derive(Clone, Default)]
pub struct InMemoryUserAccountsRepository {
    state: Arc<Mutex<TableState>>,
    calls: Arc<AtomicUsize>,
}

impl fmt::Debug for InMemoryUserAccountsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("InMemoryUserAccountsRepository");
        debug.field("calls", &self.calls.load(Ordering::SeqCst));
        match self.state.try_lock() {
            Ok(state) => {
                debug.field("rows", &state.rows.len());
            }
            Err(_) => {
                debug.field("state", &"<locked>");
            }
        }
        debug.finish()
    }
}

impl InMemoryUserAccountsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait calls served so far (seeding is not counted).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Insert a row directly, bypassing the call counter and the
    /// uniqueness check.
    pub async fn seed(&self, username: &str, password: &str, renewal_date: &str) -> i64 {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(StoredUser {
            record: UserRecord {
                id,
                username: username.to_string(),
                is_blocked: false,
                renewal_date: renewal_date.to_string(),
                ip: None,
                indicacao: 0,
            },
            password: password.to_string(),
        });
        id
    }

    pub async fn password_of(&self, username: &str) -> Option<String> {
        let state = self.state.lock().await;
        state
            .rows
            .iter()
            .find(|row| row.record.username == username)
            .map(|row| row.password.clone())
    }

    pub async fn snapshot(&self) -> Vec<UserRecord> {
        let state = self.state.lock().await;
        state.rows.iter().map(|row| row.record.clone()).collect()
    }

    /// Make every subsequent call fail as if the connection dropped.
    pub async fn set_unavailable(&self, reason: impl Into<String>) {
        self.state.lock().await.unavailable = Some(reason.into());
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn check_available(state: &TableState) -> StoreResult<()> {
    match &state.unavailable {
        Some(reason) => Err(StoreError::Database(reason.clone())),
        None => Ok(()),
    }
}

#[async_trait]
impl UserAccountsRepository for InMemoryUserAccountsRepository {
    async fn insert_user(&self, user: &NewUserRecord) -> StoreResult<u64> {
        self.record_call();
        let mut state = self.state.lock().await;
        check_available(&state)?;

        let lowered = user.username.to_lowercase();
        if state
            .rows
            .iter()
            .any(|row| row.record.username.to_lowercase() == lowered)
        {
            return Err(StoreError::UniqueViolation {
                constraint: Some("users_username_lower_key".to_string()),
                message: format!(
                    "duplicate key value violates unique constraint \"users_username_lower_key\": {}",
                    user.username
                ),
            });
        }

        state.next_id += 1;
        let id = state.next_id;
        state.rows.push(StoredUser {
            record: UserRecord {
                id,
                username: user.username.clone(),
                is_blocked: false,
                renewal_date: user.renewal_date.clone(),
                ip: None,
                indicacao: 0,
            },
            password: user.password.clone(),
        });
        Ok(1)
    }

    async fn update_field(
        &self,
        username: &str,
        update: &FieldUpdate,
    ) -> StoreResult<u64> {
        self.record_call();
        let mut state = self.state.lock().await;
        check_available(&state)?;

        let lowered = username.to_lowercase();
        let mut affected = 0;
        for row in state
            .rows
            .iter_mut()
            .filter(|row| row.record.username.to_lowercase() == lowered)
        {
            match update {
                FieldUpdate::Password(password) => row.password = password.clone(),
                FieldUpdate::Blocked(blocked) => row.record.is_blocked = *blocked,
                FieldUpdate::RenewalDate(date) => row.record.renewal_date = date.clone(),
                FieldUpdate::ReferralCount(count) => row.record.indicacao = *count,
                FieldUpdate::Ip(ip) => row.record.ip = Some(ip.clone()),
            }
            affected += 1;
        }
        Ok(affected)
    }

    async fn list_users(&self) -> StoreResult<Vec<UserRecord>> {
        self.record_call();
        let state = self.state.lock().await;
        check_available(&state)?;

        let mut records: Vec<UserRecord> =
            state.rows.iter().map(|row| row.record.clone()).collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.record_call();
        let state = self.state.lock().await;
        check_available(&state)
    }
}
