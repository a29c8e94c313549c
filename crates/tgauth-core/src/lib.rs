//! Verification of login widget assertions.
//!
//! This crate provides:
//! - Operator configuration that fails closed ([`VerifierConfig`], [`WidgetConfig`])
//! - Key derivation and HMAC signing of check-strings
//! - Freshness and constant-time signature verification ([`Verifier`])
//! - Injectable clocks and redirect URI sanitizing
//!
//! Core invariants:
//! - Key is `sha256(secret)`, signature is `hex(hmac_sha256(key, check_string))`
//! - Freshness is checked before the signature; both failures stay distinct
//! - Verification is pure: no I/O, no logging, time is passed in
//! - Secrets and derived keys never appear in `Debug` output
//!
//! ```rust
//! use tgauth_canonical::{AssertionRecord, AuthField};
//! use tgauth_core::{Verifier, VerifierConfig};
//!
//! let config = VerifierConfig::new("testsecret", 60)?;
//! let verifier = Verifier::new(&config);
//!
//! let mut record = AssertionRecord::new("42", "1700000000", "")
//!     .with(AuthField::FirstName, "Ann");
//! record.hash = verifier.sign(&record)?;
//!
//! assert!(verifier.verify(&record, 1_700_000_030).is_ok());
//! assert!(verifier.verify(&record, 1_700_000_061).is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// Injectable time sources.
pub mod clock;
/// Verifier and widget configuration.
pub mod config;
/// Error types for core operations.
pub mod errors;
/// Redirect URI sanitizing.
pub mod redirect;
/// Key derivation and signing.
pub mod signature;
/// Verification logic and verdict types.
pub mod verification;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{
    ApplicationSecret, ConfigError, VerifierConfig, WidgetConfig, AUTH_TIME_DELTA_SETTING,
    BOT_TOKEN_SETTING, BOT_USERNAME_SETTING, DEFAULT_FRESHNESS_WINDOW_SECONDS,
};
pub use errors::CoreError;
pub use redirect::sanitize_redirect_uri;
pub use signature::{compute_signature, sign, signatures_match, SignatureError, SigningKey};
pub use verification::{
    verify, RejectReason, Verdict, VerificationError, VerifiedAssertion, Verifier,
};
