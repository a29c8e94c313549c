//! Lookup-or-create of the local account behind a verified assertion.

use tgauth_core::VerifiedAssertion;
use uuid::Uuid;

use crate::account::{Account, NewAccount, EXTERNAL_ID_ATTRIBUTE};
use crate::error::StoreError;
use crate::traits::AccountStore;

/// Whether unknown remote identities may get a new local account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistrationPolicy {
    /// Provision an account on first login.
    #[default]
    Allow,
    /// Only existing accounts may log in.
    Deny,
}

/// Result of resolving an assertion to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An account already existed for the external id.
    Existing(Account),
    /// A new account was provisioned.
    Created(Account),
    /// No account exists and registration is denied.
    RegistrationDisabled,
}

impl Resolution {
    /// The resolved account, if any.
    pub fn account(&self) -> Option<&Account> {
        match self {
            Resolution::Existing(a) | Resolution::Created(a) => Some(a),
            Resolution::RegistrationDisabled => None,
        }
    }
}

/// Finds the account joined to the assertion's external id, creating one if
/// absent and `policy` allows it.
///
/// The new account uses the remote username when it is present and not
/// blank, and a random UUID otherwise or when the remote username is already
/// taken locally. If a concurrent request created the account first, the
/// losing create is turned back into a lookup, so the same external id never
/// yields two accounts.
pub fn resolve_account<S: AccountStore + ?Sized>(
    store: &S,
    assertion: &VerifiedAssertion,
    policy: RegistrationPolicy,
) -> Result<Resolution, StoreError> {
    let external_id = assertion.external_id();
    if let Some(account) = store.find_by_attribute(EXTERNAL_ID_ATTRIBUTE, external_id)? {
        tracing::debug!(account_id = %account.id, "resolved existing account");
        return Ok(Resolution::Existing(account));
    }

    if policy == RegistrationPolicy::Deny {
        tracing::info!("cannot create account for new remote identity: registration is not allowed");
        return Ok(Resolution::RegistrationDisabled);
    }

    let preferred = assertion
        .record()
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned);

    let first_try = preferred.unwrap_or_else(random_username);
    match create_or_adopt(store, assertion, first_try) {
        Err(StoreError::UsernameTaken(name)) => {
            tracing::warn!(username = %name, "remote username taken locally, using a generated one");
            create_or_adopt(store, assertion, random_username())
        }
        other => other,
    }
}

fn create_or_adopt<S: AccountStore + ?Sized>(
    store: &S,
    assertion: &VerifiedAssertion,
    username: String,
) -> Result<Resolution, StoreError> {
    match store.create(NewAccount::from_assertion(assertion, username)) {
        Ok(account) => {
            tracing::info!(account_id = %account.id, username = %account.username, "provisioned account");
            Ok(Resolution::Created(account))
        }
        Err(StoreError::Conflict { attribute, value }) => {
            tracing::debug!("lost creation race, retrying as lookup");
            store
                .find_by_attribute(EXTERNAL_ID_ATTRIBUTE, assertion.external_id())?
                .map(Resolution::Existing)
                .ok_or(StoreError::Conflict { attribute, value })
        }
        Err(e) => Err(e),
    }
}

fn random_username() -> String {
    Uuid::new_v4().to_string()
}
