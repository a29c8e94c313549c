use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields a login widget may send back with an assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthField {
    /// Stable identifier issued by the remote provider.
    Id,
    /// Display first name.
    FirstName,
    /// Display last name.
    LastName,
    /// Remote provider handle.
    Username,
    /// Avatar reference.
    PhotoUrl,
    /// Signing time in seconds since the epoch, as text.
    AuthDate,
    /// Lowercase hex MAC over the other fields.
    Hash,
}

impl AuthField {
    /// Every recognized field, in declaration order.
    pub const ALL: [AuthField; 7] = [
        AuthField::Id,
        AuthField::FirstName,
        AuthField::LastName,
        AuthField::Username,
        AuthField::PhotoUrl,
        AuthField::AuthDate,
        AuthField::Hash,
    ];

    /// Canonical (case-sensitive) wire name of the field.
    pub const fn name(self) -> &'static str {
        match self {
            AuthField::Id => "id",
            AuthField::FirstName => "first_name",
            AuthField::LastName => "last_name",
            AuthField::Username => "username",
            AuthField::PhotoUrl => "photo_url",
            AuthField::AuthDate => "auth_date",
            AuthField::Hash => "hash",
        }
    }

    /// Looks up a field by its canonical wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Whether the field participates in the check-string.
    pub const fn is_signable(self) -> bool {
        !matches!(self, AuthField::Hash)
    }
}

impl fmt::Display for AuthField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Signable fields, already in byte-lexicographic order of their names.
pub const SIGNABLE_FIELDS: [AuthField; 6] = [
    AuthField::AuthDate,
    AuthField::FirstName,
    AuthField::Id,
    AuthField::LastName,
    AuthField::PhotoUrl,
    AuthField::Username,
];

/// Fields that must all be present for a field set to count as an assertion.
pub const REQUIRED_FIELDS: [AuthField; 3] = [AuthField::Id, AuthField::AuthDate, AuthField::Hash];
