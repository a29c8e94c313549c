//! Local account records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tgauth_core::VerifiedAssertion;
use uuid::Uuid;

/// Attribute joining a local account to the remote identity. Unique per store.
pub const EXTERNAL_ID_ATTRIBUTE: &str = "telegram_user_id";
/// Attribute holding the remote handle.
pub const USERNAME_ATTRIBUTE: &str = "telegram_username";
/// Attribute holding the avatar reference.
pub const PHOTO_URL_ATTRIBUTE: &str = "telegram_photo_url";

/// A stored local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Local username, lowercase, unique per store.
    pub username: String,
    /// Whether the account may log in.
    pub enabled: bool,
    /// Display first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Display last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Single-valued attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Account {
    /// Value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Remote identifier this account is joined to, if any.
    pub fn external_id(&self) -> Option<&str> {
        self.attribute(EXTERNAL_ID_ATTRIBUTE)
    }
}

/// Account to be created; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Requested username.
    pub username: String,
    /// Whether the account may log in.
    pub enabled: bool,
    /// Display first name.
    pub first_name: Option<String>,
    /// Display last name.
    pub last_name: Option<String>,
    /// Single-valued attributes.
    pub attributes: BTreeMap<String, String>,
}

impl NewAccount {
    /// Provisions an enabled account from a verified assertion.
    ///
    /// Absent remote values are not stored as attributes.
    pub fn from_assertion(assertion: &VerifiedAssertion, username: impl Into<String>) -> Self {
        let record = assertion.record();
        let mut attributes = BTreeMap::new();
        attributes.insert(EXTERNAL_ID_ATTRIBUTE.to_string(), record.external_id.clone());
        if let Some(handle) = &record.username {
            attributes.insert(USERNAME_ATTRIBUTE.to_string(), handle.clone());
        }
        if let Some(photo) = &record.photo_url {
            attributes.insert(PHOTO_URL_ATTRIBUTE.to_string(), photo.clone());
        }

        Self {
            username: username.into(),
            enabled: true,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            attributes,
        }
    }

    pub(crate) fn into_account(self, id: Uuid) -> Account {
        Account {
            id,
            username: self.username.to_lowercase(),
            enabled: self.enabled,
            first_name: self.first_name,
            last_name: self.last_name,
            attributes: self.attributes,
        }
    }
}
