//! # Userdesk Server
//!
//! HTTP backend for administering user accounts.
//!
//! - `POST /api/user-action`: tagged mutations (create, password, block,
//!   renewal, referral count, IP)
//! - `GET /api/usuarios`: account listing
//! - `GET /`: bundled admin page
//!
//! Built on Axum with PostgreSQL (SQLx) as the record store.

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod public_ip;
pub mod routes;

pub use infra::app_state::AppState;
