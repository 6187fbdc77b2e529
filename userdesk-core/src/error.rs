use thiserror::Error;

/// Failures reported by a record store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{message}")]
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },

    #[error("{0}")]
    Database(String),

    /// The task running the statement panicked or was aborted.
    #[error("store task failed: {0}")]
    TaskAborted(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Request problems detected before the store is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Unknown action")]
    UnknownAction(String),

    #[error("Invalid referral count value")]
    InvalidReferralCount,
}

/// Every way a dispatched action can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The statement ran but matched zero rows.
    #[error("No user found with the given username")]
    NotFound,

    /// The store failed while running a well-formed request. The cause is
    /// surfaced verbatim to the caller.
    #[error("Error executing action '{action}': {cause}")]
    Execution { action: String, cause: StoreError },
}

impl ActionError {
    pub fn execution(action: impl Into<String>, cause: StoreError) -> Self {
        Self::Execution {
            action: action.into(),
            cause,
        }
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;
