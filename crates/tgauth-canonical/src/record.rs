use crate::fields::AuthField;
use serde::{Deserialize, Serialize};

/// Decoded, still untrusted claim about a remote identity.
///
/// Optional fields that were not sent stay `None` and are left out of the
/// check-string; `Some(String::new())` is a present, empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionRecord {
    /// Stable identifier issued by the remote provider.
    #[serde(rename = "id")]
    pub external_id: String,
    /// Display first name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Display last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Remote provider handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Signing time as decimal seconds since the epoch, unparsed.
    pub auth_date: String,
    /// Claimed signature, lowercase hex.
    pub hash: String,
}

impl AssertionRecord {
    /// Creates a record carrying only the required fields.
    pub fn new(
        external_id: impl Into<String>,
        auth_date: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            first_name: None,
            last_name: None,
            username: None,
            photo_url: None,
            auth_date: auth_date.into(),
            hash: hash.into(),
        }
    }

    /// Returns the value of a field, `None` when it was not sent.
    pub fn get(&self, field: AuthField) -> Option<&str> {
        match field {
            AuthField::Id => Some(&self.external_id),
            AuthField::FirstName => self.first_name.as_deref(),
            AuthField::LastName => self.last_name.as_deref(),
            AuthField::Username => self.username.as_deref(),
            AuthField::PhotoUrl => self.photo_url.as_deref(),
            AuthField::AuthDate => Some(&self.auth_date),
            AuthField::Hash => Some(&self.hash),
        }
    }

    /// Sets a field. Required fields ignore `None`.
    pub fn set(&mut self, field: AuthField, value: Option<String>) {
        match field {
            AuthField::Id => {
                if let Some(v) = value {
                    self.external_id = v;
                }
            }
            AuthField::FirstName => self.first_name = value,
            AuthField::LastName => self.last_name = value,
            AuthField::Username => self.username = value,
            AuthField::PhotoUrl => self.photo_url = value,
            AuthField::AuthDate => {
                if let Some(v) = value {
                    self.auth_date = v;
                }
            }
            AuthField::Hash => {
                if let Some(v) = value {
                    self.hash = v;
                }
            }
        }
    }

    /// Builder-style variant of [`AssertionRecord::set`].
    pub fn with(mut self, field: AuthField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }
}
