//! Account resolution and login flow for verified widget assertions.
//!
//! This crate provides:
//! - `AccountStore` trait with at-most-one-account-per-external-id semantics
//! - In-memory and JSON-file backends
//! - `resolve_account`, the lookup-or-create step behind a verified assertion
//! - `LoginFlow`, tying source selection, verification and resolution together
//!
//! Verification itself lives in `tgauth-core` and never touches a store;
//! resolution only accepts a `VerifiedAssertion`.

#![deny(missing_docs)]

/// Local account records.
pub mod account;
/// Error types for store operations.
pub mod error;
/// JSON-file backend.
pub mod file;
/// Login flow controller.
pub mod flow;
/// In-memory backend.
pub mod memory;
/// Lookup-or-create.
pub mod resolve;
mod table;
/// Storage backend traits.
pub mod traits;

pub use account::{
    Account, NewAccount, EXTERNAL_ID_ATTRIBUTE, PHOTO_URL_ATTRIBUTE, USERNAME_ATTRIBUTE,
};
pub use error::StoreError;
pub use file::FileAccountStore;
pub use flow::{
    extract_field_set, select_field_set, AuthRequest, FailureReason, LoginFlow, LoginOutcome,
    WidgetAttributes, PUBLIC_FAILURE_MESSAGE,
};
pub use memory::MemoryAccountStore;
pub use resolve::{resolve_account, RegistrationPolicy, Resolution};
pub use traits::AccountStore;
