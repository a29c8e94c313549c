//! JSON-file account store.
//!
//! The whole table lives in one JSON document of the form
//! `{"accounts": [...]}`. Every write replaces the file through a temporary
//! file in the same directory, so readers never see a half-written
//! document. Uniqueness holds within one process; several processes sharing
//! a file need an external lock.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::account::{Account, NewAccount};
use crate::error::StoreError;
use crate::table::AccountTable;
use crate::traits::AccountStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountFile {
    accounts: Vec<Account>,
}

/// Account store persisted as a JSON file.
#[derive(Debug)]
pub struct FileAccountStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileAccountStore {
    /// Opens (without creating) the store at `path`. A missing file reads as empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };
        // Fail early on unreadable or corrupt files.
        store.load()?;
        Ok(store)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of every stored account.
    pub fn accounts(&self) -> Result<Vec<Account>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.accounts().to_vec())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn load(&self) -> Result<AccountTable, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AccountTable::default())
            }
            Err(e) => return Err(e.into()),
        };
        let parsed: AccountFile = serde_json::from_reader(BufReader::new(file))?;
        AccountTable::from_accounts(parsed.accounts)
    }

    fn save(&self, table: &AccountTable) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer_pretty(
                &mut writer,
                &AccountFile {
                    accounts: table.accounts().to_vec(),
                },
            )?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl AccountStore for FileAccountStore {
    fn find_by_attribute(&self, name: &str, value: &str) -> Result<Option<Account>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.find_by_attribute(name, value).cloned())
    }

    fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.get(id).cloned())
    }

    fn create(&self, account: NewAccount) -> Result<Account, StoreError> {
        let _guard = self.guard()?;
        let mut table = self.load()?;
        let created = table.insert(account)?;
        self.save(&table)?;
        Ok(created)
    }

    fn count(&self) -> Result<usize, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.accounts().len())
    }
}
