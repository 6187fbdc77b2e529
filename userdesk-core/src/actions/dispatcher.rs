use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::payload::{DecodedAction, StoreCommand, UserAction};
use crate::database::ports::user_accounts::UserAccountsRepository;
use crate::error::{ActionError, Result, StoreError, StoreResult};

/// Result of an action that matched at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Tag as received from the caller.
    pub action: String,
    pub affected_rows: u64,
}

impl ActionOutcome {
    pub fn message(&self) -> String {
        format!("Action '{}' executed successfully", self.action)
    }
}

/// Turns one decoded action into one single-row statement and classifies
/// what happened.
#[derive(Clone)]
pub struct ActionDispatcher {
    store: Arc<dyn UserAccountsRepository>,
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("store_ptr", &Arc::as_ptr(&self.store))
            .finish()
    }
}

impl StoreCommand {
    async fn execute(&self, store: &dyn UserAccountsRepository) -> StoreResult<u64> {
        match self {
            StoreCommand::Insert(user) => store.insert_user(user).await,
            StoreCommand::Update { username, update } => {
                store.update_field(username, update).await
            }
        }
    }
}

impl ActionDispatcher {
    pub fn new(store: Arc<dyn UserAccountsRepository>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn UserAccountsRepository> {
        Arc::clone(&self.store)
    }

    /// Parse and run a raw request body.
    pub async fn dispatch_body(&self, body: &[u8]) -> Result<ActionOutcome> {
        let decoded = UserAction::parse_body(body)?;
        self.dispatch(decoded).await
    }

    /// Decode and run an already-parsed payload.
    pub async fn dispatch_payload(&self, payload: &Value) -> Result<ActionOutcome> {
        let decoded = UserAction::from_payload(payload)?;
        self.dispatch(decoded).await
    }

    /// Run a decoded action.
    ///
    /// The statement runs on its own task so it completes even when the
    /// caller stops waiting (for example, the HTTP client disconnects).
    pub async fn dispatch(&self, decoded: DecodedAction) -> Result<ActionOutcome> {
        let DecodedAction { tag, action } = decoded;
        let kind = action.kind();
        debug!(
            action = %tag,
            kind = kind.tag(),
            username = action.username(),
            "dispatching user action"
        );

        let command = action.into_command();
        let store = Arc::clone(&self.store);
        let affected_rows = tokio::spawn(async move { command.execute(store.as_ref()).await })
            .await
            .map_err(|join_err| StoreError::TaskAborted(join_err.to_string()))
            .and_then(|result| result)
            .map_err(|cause| {
                error!(action = %tag, error = %cause, "user action failed");
                ActionError::execution(tag.clone(), cause)
            })?;

        if affected_rows == 0 {
            warn!(action = %tag, "user action matched no rows");
            return Err(ActionError::NotFound);
        }

        info!(action = %tag, affected_rows, "user action applied");
        Ok(ActionOutcome {
            action: tag,
            affected_rows,
        })
    }
}
