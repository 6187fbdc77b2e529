#![cfg(feature = "e2e")]

use sqlx::PgPool;
use userdesk_core::{
    ActionDispatcher, ActionError, StoreError,
    database::{PostgresDatabase, UserAccountsRepository},
};
use serde_json::json;
use std::sync::Arc;

fn dispatcher(pool: PgPool) -> (ActionDispatcher, Arc<dyn UserAccountsRepository>) {
    let repo: Arc<dyn UserAccountsRepository> =
        Arc::new(PostgresDatabase::from_pool(pool, 5).user_accounts());
    (ActionDispatcher::new(Arc::clone(&repo)), repo)
}

#[sqlx::test(migrations = false, fixtures("users"))]
async fn set_blocked_matches_stored_username_ignoring_case(pool: PgPool) {
    let (dispatcher, repo) = dispatcher(pool);

    let outcome = dispatcher
        .dispatch_payload(&json!({
            "action": "set-blocked",
            "username": "Alice",
            "isBlocked": true
        }))
        .await
        .expect("update succeeds");
    assert_eq!(outcome.affected_rows, 1);

    let users = repo.list_users().await.expect("list users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
    assert!(users[0].is_blocked);
}

#[sqlx::test(migrations = false, fixtures("users"))]
async fn create_user_starts_unblocked_with_zero_referrals(pool: PgPool) {
    let (dispatcher, repo) = dispatcher(pool);

    dispatcher
        .dispatch_payload(&json!({
            "action": "create-user",
            "username": "bob",
            "password": "p",
            "renewalDate": "2025-01-01"
        }))
        .await
        .expect("create succeeds");

    let users = repo.list_users().await.expect("list users");
    let bob = users
        .iter()
        .find(|user| user.username == "bob")
        .expect("bob listed");
    assert_eq!(bob.indicacao, 0);
    assert!(!bob.is_blocked);
    assert_eq!(bob.ip, None);
    assert!(users[0].id < bob.id);
}

#[sqlx::test(migrations = false, fixtures("users"))]
async fn case_equivalent_duplicate_is_a_unique_violation(pool: PgPool) {
    let (dispatcher, _) = dispatcher(pool);

    let err = dispatcher
        .dispatch_payload(&json!({
            "action": "create-user",
            "username": "ALICE",
            "password": "p",
            "renewalDate": "2025-01-01"
        }))
        .await
        .expect_err("duplicate rejected");

    assert!(matches!(
        err,
        ActionError::Execution {
            cause: StoreError::UniqueViolation { .. },
            ..
        }
    ));
}

#[sqlx::test(migrations = false, fixtures("users"))]
async fn missing_username_reports_not_found(pool: PgPool) {
    let (dispatcher, repo) = dispatcher(pool);
    let before = repo.list_users().await.expect("list users");

    let err = dispatcher
        .dispatch_payload(&json!({
            "action": "set-referral",
            "username": "nobody",
            "indicacao": 9
        }))
        .await
        .expect_err("no such user");

    assert_eq!(err, ActionError::NotFound);
    assert_eq!(repo.list_users().await.expect("list users"), before);
}

#[sqlx::test(migrations = false, fixtures("users"))]
async fn set_ip_writes_empty_string_not_null(pool: PgPool) {
    let (dispatcher, repo) = dispatcher(pool);

    dispatcher
        .dispatch_payload(&json!({ "action": "set-ip", "username": "alice", "newIp": "" }))
        .await
        .expect("update succeeds");

    let users = repo.list_users().await.expect("list users");
    assert_eq!(users[0].ip.as_deref(), Some(""));
}

#[sqlx::test(migrations = false, fixtures("users"))]
async fn renewal_date_is_stored_and_listed_verbatim(pool: PgPool) {
    let (dispatcher, repo) = dispatcher(pool);

    dispatcher
        .dispatch_payload(&json!({
            "action": "set-renewal",
            "username": "alice",
            "renewalDate": "2026-03-31"
        }))
        .await
        .expect("update succeeds");
    dispatcher
        .dispatch_payload(&json!({
            "action": "create-user",
            "username": "bob",
            "password": "p",
            "renewalDate": "31/12/2026"
        }))
        .await
        .expect("create succeeds");

    let users = repo.list_users().await.expect("list users");
    let dates: Vec<&str> = users.iter().map(|user| user.renewal_date.as_str()).collect();
    assert_eq!(dates, ["2026-03-31", "31/12/2026"]);
}
