//! Storage backend traits.

use uuid::Uuid;

use crate::account::{Account, NewAccount};
use crate::error::StoreError;

/// Account storage with at-most-one-account-per-external-id semantics.
///
/// Implementations must make `create` atomic with respect to its
/// uniqueness checks: of two concurrent creates for the same external id,
/// exactly one succeeds and the other gets [`StoreError::Conflict`].
pub trait AccountStore: Send + Sync {
    /// Finds the account whose attribute `name` equals `value`.
    fn find_by_attribute(&self, name: &str, value: &str) -> Result<Option<Account>, StoreError>;

    /// Fetches an account by id.
    fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Creates an account.
    ///
    /// Fails with [`StoreError::Conflict`] when the external id is taken and
    /// with [`StoreError::UsernameTaken`] when the username is.
    fn create(&self, account: NewAccount) -> Result<Account, StoreError>;

    /// Number of stored accounts.
    fn count(&self) -> Result<usize, StoreError>;
}

impl<S: AccountStore + ?Sized> AccountStore for std::sync::Arc<S> {
    fn find_by_attribute(&self, name: &str, value: &str) -> Result<Option<Account>, StoreError> {
        (**self).find_by_attribute(name, value)
    }

    fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        (**self).get(id)
    }

    fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        (**self).create(account)
    }

    fn count(&self) -> Result<usize, StoreError> {
        (**self).count()
    }
}
