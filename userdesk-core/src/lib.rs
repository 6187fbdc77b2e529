//! # Userdesk Core
//!
//! Core library for the userdesk administrative backend: account record
//! types, the action dispatcher behind `POST /api/user-action`, and the
//! record store port with its PostgreSQL adapter.
//!
//! ## Overview
//!
//! - **Records**: [`domain::UserRecord`] and the single-field updates the
//!   store understands
//! - **Actions**: a tagged union ([`actions::UserAction`]) decoded leniently
//!   from a JSON payload
//! - **Dispatch**: [`actions::ActionDispatcher`] maps one action to one
//!   single-row statement and classifies the outcome
//! - **Envelope**: [`api_types::ApiEnvelope`], the `{message, data?}`
//!   wrapper every response uses
//! - **Store**: [`database::ports::user_accounts::UserAccountsRepository`]
//!   and its adapters
//!
//! ## Feature Flags
//!
//! - `database`: PostgreSQL adapter (SQLx)
//! - `test-utils`: in-memory record store for tests
//! - `e2e`: tests that require a running PostgreSQL

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Action decoding and dispatch
pub mod actions;

/// Common API routes
pub mod api_routes;

/// Response envelope shared with the HTTP layer
pub mod api_types;

/// Record store port and adapters
pub mod database;

/// Account record types
pub mod domain;

/// Error taxonomy
pub mod error;

pub use actions::{ActionDispatcher, ActionOutcome, UserAction};
pub use api_types::ApiEnvelope;
pub use domain::{FieldUpdate, NewUserRecord, UserRecord};
pub use error::{ActionError, StoreError, ValidationError};
