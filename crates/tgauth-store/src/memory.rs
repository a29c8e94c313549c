//! In-memory account store.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::account::{Account, NewAccount};
use crate::error::StoreError;
use crate::table::AccountTable;
use crate::traits::AccountStore;

/// Mutex-guarded account table. Uniqueness checks and the insert happen
/// under one lock acquisition.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    table: Mutex<AccountTable>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `accounts`.
    pub fn with_accounts(accounts: Vec<Account>) -> Result<Self, StoreError> {
        Ok(Self {
            table: Mutex::new(AccountTable::from_accounts(accounts)?),
        })
    }

    /// Snapshot of every stored account.
    pub fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.lock()?.accounts().to_vec())
    }

    fn lock(&self) -> Result<MutexGuard<'_, AccountTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl AccountStore for MemoryAccountStore {
    fn find_by_attribute(&self, name: &str, value: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.lock()?.find_by_attribute(name, value).cloned())
    }

    fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        self.lock()?.insert(account)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.accounts().len())
    }
}
