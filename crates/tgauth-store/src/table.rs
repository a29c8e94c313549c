//! Indexed in-memory account table shared by the backends.

use std::collections::HashMap;

use uuid::Uuid;

use crate::account::{Account, NewAccount, EXTERNAL_ID_ATTRIBUTE};
use crate::error::StoreError;

/// Accounts plus unique indexes on id, external id and username.
///
/// Every mutation checks all unique constraints before touching anything,
/// so a failed insert leaves the table unchanged.
#[derive(Debug, Default)]
pub(crate) struct AccountTable {
    accounts: Vec<Account>,
    by_id: HashMap<Uuid, usize>,
    by_external_id: HashMap<String, usize>,
    by_username: HashMap<String, usize>,
}

impl AccountTable {
    /// Rebuilds the indexes, rejecting data that breaks a uniqueness rule.
    ///
    /// Usernames are lowercased on load so stored data obeys the same rule
    /// as newly created accounts.
    pub(crate) fn from_accounts(accounts: Vec<Account>) -> Result<Self, StoreError> {
        let mut table = AccountTable::default();
        for mut account in accounts {
            account.username = account.username.to_lowercase();
            if table.by_id.contains_key(&account.id) {
                return Err(StoreError::Corrupt(format!("duplicate id {}", account.id)));
            }
            if table.by_username.contains_key(&account.username) {
                return Err(StoreError::Corrupt(format!(
                    "duplicate username {}",
                    account.username
                )));
            }
            if let Some(ext) = account.external_id() {
                if table.by_external_id.contains_key(ext) {
                    return Err(StoreError::Corrupt(format!(
                        "duplicate {EXTERNAL_ID_ATTRIBUTE} {ext}"
                    )));
                }
            }
            table.push(account);
        }
        Ok(table)
    }

    pub(crate) fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<&Account> {
        self.by_id.get(&id).map(|&i| &self.accounts[i])
    }

    pub(crate) fn find_by_attribute(&self, name: &str, value: &str) -> Option<&Account> {
        if name == EXTERNAL_ID_ATTRIBUTE {
            return self.by_external_id.get(value).map(|&i| &self.accounts[i]);
        }
        self.accounts
            .iter()
            .find(|account| account.attribute(name) == Some(value))
    }

    pub(crate) fn insert(&mut self, new: NewAccount) -> Result<Account, StoreError> {
        if let Some(ext) = new.attributes.get(EXTERNAL_ID_ATTRIBUTE) {
            if self.by_external_id.contains_key(ext) {
                return Err(StoreError::Conflict {
                    attribute: EXTERNAL_ID_ATTRIBUTE,
                    value: ext.clone(),
                });
            }
        }
        let account = new.into_account(Uuid::new_v4());
        if self.by_username.contains_key(&account.username) {
            return Err(StoreError::UsernameTaken(account.username));
        }
        self.push(account.clone());
        Ok(account)
    }

    fn push(&mut self, account: Account) {
        let index = self.accounts.len();
        self.by_id.insert(account.id, index);
        self.by_username.insert(account.username.clone(), index);
        if let Some(ext) = account.external_id() {
            self.by_external_id.insert(ext.to_string(), index);
        }
        self.accounts.push(account);
    }
}
