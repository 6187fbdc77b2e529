pub mod infrastructure;
pub mod ports;

#[cfg(feature = "database")]
pub use infrastructure::postgres::{
    PostgresDatabase, repositories::user_accounts::PostgresUserAccountsRepository,
};

#[cfg(any(test, feature = "test-utils"))]
pub use infrastructure::memory::InMemoryUserAccountsRepository;

pub use ports::user_accounts::UserAccountsRepository;
