#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum_test::TestServer;
use userdesk_core::database::{InMemoryUserAccountsRepository, UserAccountsRepository};
use userdesk_server::{
    AppState,
    infra::config::{Config, ServeArgs},
    routes::create_app,
};

pub struct TestApp {
    pub server: TestServer,
    pub repo: InMemoryUserAccountsRepository,
}

pub fn test_config() -> Config {
    Config::from_args(&ServeArgs {
        database_url: Some("postgres://userdesk@localhost/userdesk_test".into()),
        port: Some(0),
        host: Some("127.0.0.1".into()),
        ..Default::default()
    })
}

pub fn build_test_app_with(
    repo: InMemoryUserAccountsRepository,
    config: Config,
) -> Result<TestApp> {
    let store: Arc<dyn UserAccountsRepository> = Arc::new(repo.clone());
    let state = AppState::new(store, Arc::new(config));
    let server = TestServer::new(create_app(state))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(TestApp { server, repo })
}

pub async fn build_test_app() -> Result<TestApp> {
    let repo = InMemoryUserAccountsRepository::new();
    repo.seed("alice", "secret", "2025-01-01").await;
    build_test_app_with(repo, test_config())
}
