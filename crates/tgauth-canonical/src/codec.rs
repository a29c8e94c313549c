//! Decoding of raw field sets into assertion records.
//!
//! A field set is what a host gets out of a query string or an
//! `application/x-www-form-urlencoded` body: each name maps to one or more
//! values. Only the first value of each recognized name is ever read.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::fields::{AuthField, REQUIRED_FIELDS};
use crate::record::AssertionRecord;

/// Multi-valued mapping from field name to raw string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: BTreeMap<String, Vec<String>>,
}

impl FieldSet {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        Self::from_form_body(query.as_bytes())
    }

    /// Parses an urlencoded form body.
    pub fn from_form_body(body: &[u8]) -> Self {
        form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Appends a value for `name`, keeping earlier values first.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Replaces every value of `name` with `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), vec![value.into()]);
    }

    /// First value sent for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values sent for `name`.
    pub fn all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether every field in `required` has at least one value.
    pub fn contains_all(&self, required: &[AuthField]) -> bool {
        required.iter().all(|field| self.first(field.name()).is_some())
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no names at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Re-encodes the set as urlencoded text, names in sorted order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, values) in &self.values {
            for value in values {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Decodes a field set using the default required fields (`id`, `auth_date`, `hash`).
pub fn decode(fields: &FieldSet) -> Option<AssertionRecord> {
    decode_with(fields, &REQUIRED_FIELDS)
}

/// Decodes a field set, yielding `None` unless every field in `required` is present.
///
/// `id`, `auth_date` and `hash` are needed to build a record whatever
/// `required` says. Values are copied verbatim; nothing is parsed or
/// validated here.
pub fn decode_with(fields: &FieldSet, required: &[AuthField]) -> Option<AssertionRecord> {
    if !fields.contains_all(required) {
        return None;
    }

    let first = |field: AuthField| fields.first(field.name()).map(str::to_owned);

    Some(AssertionRecord {
        external_id: first(AuthField::Id)?,
        first_name: first(AuthField::FirstName),
        last_name: first(AuthField::LastName),
        username: first(AuthField::Username),
        photo_url: first(AuthField::PhotoUrl),
        auth_date: first(AuthField::AuthDate)?,
        hash: first(AuthField::Hash)?,
    })
}
