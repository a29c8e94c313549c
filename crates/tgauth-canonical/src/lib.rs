//! Canonical primitives for login widget assertions.
//!
//! This crate knows the wire names of the widget fields, decodes untrusted
//! field sets into [`AssertionRecord`]s and rebuilds the check-string the
//! remote provider signed. It performs no cryptography; see `tgauth-core`.
//!
#![deny(missing_docs)]

/// Check-string construction.
pub mod canonicalizer;
/// Field set parsing and decoding.
pub mod codec;
/// Canonical field names.
pub mod fields;
/// Validated identifier newtypes.
pub mod identifiers;
/// Decoded assertion record.
pub mod record;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{check_string, is_signed, signable_pairs};
pub use codec::{decode, decode_with, FieldSet};
pub use fields::{AuthField, REQUIRED_FIELDS, SIGNABLE_FIELDS};
pub use identifiers::BotUsername;
pub use record::AssertionRecord;
pub use validation::ValidationError;
