pub mod user_accounts;
