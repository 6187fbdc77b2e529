use std::{fmt, sync::Arc};

use userdesk_core::{ActionDispatcher, database::UserAccountsRepository};

use crate::infra::config::Config;

/// Per-process handles shared by every request. The store (and its pool)
/// is the only shared resource; there is no other mutable state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: ActionDispatcher,
    pub users: Arc<dyn UserAccountsRepository>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(store: Arc<dyn UserAccountsRepository>, config: Arc<Config>) -> Self {
        Self {
            dispatcher: ActionDispatcher::new(Arc::clone(&store)),
            users: store,
            config,
        }
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn users(&self) -> &dyn UserAccountsRepository {
        self.users.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
