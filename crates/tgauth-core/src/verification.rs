use serde::Serialize;
use tgauth_canonical::AssertionRecord;

use crate::config::VerifierConfig;
use crate::signature::{sign, signatures_match, SignatureError, SigningKey};

/// Why an assertion was rejected.
///
/// Hosts must show every variant to end users as the same generic
/// failure; the distinction is for diagnostics only.
#[derive(thiserror::Error, Debug)]
pub enum VerificationError {
    /// `auth_date` is not a base-10 integer.
    #[error("auth_date is not an integer")]
    MalformedTimestamp,
    /// `auth_date` is older than the freshness window allows.
    #[error("assertion expired: {age}s old, window is {window}s")]
    Expired {
        /// Age of the assertion in seconds.
        age: u64,
        /// Configured window in seconds.
        window: u64,
    },
    /// The claimed `hash` does not match the recomputed one.
    #[error("signature mismatch")]
    SignatureMismatch,
    /// The MAC primitive failed; never treated as success.
    #[error("internal error: {0}")]
    Internal(#[from] SignatureError),
}

/// Stable, loggable code for a [`VerificationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// See [`VerificationError::MalformedTimestamp`].
    MalformedTimestamp,
    /// See [`VerificationError::Expired`].
    Expired,
    /// See [`VerificationError::SignatureMismatch`].
    SignatureMismatch,
    /// See [`VerificationError::Internal`].
    Internal,
}

impl RejectReason {
    /// Snake-case code, e.g. `signature_mismatch`.
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::MalformedTimestamp => "malformed_timestamp",
            RejectReason::Expired => "expired",
            RejectReason::SignatureMismatch => "signature_mismatch",
            RejectReason::Internal => "internal",
        }
    }
}

impl VerificationError {
    /// Stable code for this error.
    pub fn reason(&self) -> RejectReason {
        match self {
            VerificationError::MalformedTimestamp => RejectReason::MalformedTimestamp,
            VerificationError::Expired { .. } => RejectReason::Expired,
            VerificationError::SignatureMismatch => RejectReason::SignatureMismatch,
            VerificationError::Internal(_) => RejectReason::Internal,
        }
    }

    /// Whether this is an internal failure rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, VerificationError::Internal(_))
    }
}

/// An assertion whose signature and freshness were checked.
///
/// Only [`Verifier`] can build one, so holding it is proof of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedAssertion(AssertionRecord);

impl VerifiedAssertion {
    /// The verified record.
    pub fn record(&self) -> &AssertionRecord {
        &self.0
    }

    /// Stable identifier of the remote identity.
    pub fn external_id(&self) -> &str {
        &self.0.external_id
    }

    /// Unwraps the record.
    pub fn into_record(self) -> AssertionRecord {
        self.0
    }
}

/// Outcome of checking an assertion.
#[derive(Debug)]
pub enum Verdict {
    /// Signature and freshness hold.
    Verified(VerifiedAssertion),
    /// The assertion was rejected.
    Rejected(VerificationError),
}

impl Verdict {
    /// Whether the assertion verified.
    pub fn is_verified(&self) -> bool {
        matches!(self, Verdict::Verified(_))
    }
}

/// Verifies assertions against one configuration.
///
/// The signing key is derived once at construction. The verifier is
/// immutable and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: SigningKey,
    window: u64,
}

impl Verifier {
    /// Creates a verifier for the given configuration.
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            key: SigningKey::from_config(config),
            window: config.freshness_window_seconds(),
        }
    }

    /// Freshness window in seconds.
    pub fn freshness_window_seconds(&self) -> u64 {
        self.window
    }

    /// Checks freshness, then the signature.
    ///
    /// `now` is seconds since the epoch. A timestamp later than `now` is
    /// accepted; only staleness beyond the window is rejected.
    pub fn verify(&self, record: &AssertionRecord, now: i64) -> Result<(), VerificationError> {
        self.check_freshness(&record.auth_date, now)?;
        self.check_signature(record)
    }

    /// Like [`Verifier::verify`], but consumes the record and returns a [`Verdict`].
    pub fn check(&self, record: AssertionRecord, now: i64) -> Verdict {
        match self.verify(&record, now) {
            Ok(()) => Verdict::Verified(VerifiedAssertion(record)),
            Err(e) => Verdict::Rejected(e),
        }
    }

    /// Rejects `auth_date` values that do not parse or are too old.
    pub fn check_freshness(&self, auth_date: &str, now: i64) -> Result<(), VerificationError> {
        let auth_date: i64 = auth_date
            .parse()
            .map_err(|_| VerificationError::MalformedTimestamp)?;

        // i128 keeps extreme values from overflowing.
        let age = i128::from(now) - i128::from(auth_date);
        if age > i128::from(self.window) {
            return Err(VerificationError::Expired {
                age: u64::try_from(age).unwrap_or(u64::MAX),
                window: self.window,
            });
        }
        Ok(())
    }

    /// Recomputes the signature and compares it in constant time.
    pub fn check_signature(&self, record: &AssertionRecord) -> Result<(), VerificationError> {
        let expected = sign(record, &self.key)?;
        if signatures_match(&expected, &record.hash) {
            Ok(())
        } else {
            Err(VerificationError::SignatureMismatch)
        }
    }

    /// Signs a record with this verifier's key.
    pub fn sign(&self, record: &AssertionRecord) -> Result<String, SignatureError> {
        sign(record, &self.key)
    }
}

/// One-shot verification: derives the key from `config` and verifies `record` at `now`.
///
/// Prefer [`Verifier`] when verifying more than one assertion.
pub fn verify(
    record: &AssertionRecord,
    config: &VerifierConfig,
    now: i64,
) -> Result<(), VerificationError> {
    Verifier::new(config).verify(record, now)
}
