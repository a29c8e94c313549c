//! Reading field sets from command-line sources.

use std::io::{self, Read};

use tgauth_canonical::{AuthField, FieldSet};
use tgauth_store::select_field_set;
use url::Url;

use crate::FieldSource;

/// Fields an assertion needs before it has been signed.
pub const UNSIGNED_FIELDS: [AuthField; 2] = [AuthField::Id, AuthField::AuthDate];

/// Reads a form body from a file, or stdin for `-`. Trailing whitespace is dropped.
pub fn read_body(path: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut body = if path == "-" {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        std::fs::read(path).map_err(|e| format!("Failed to read file {}: {}", path, e))?
    };
    while body.last().is_some_and(u8::is_ascii_whitespace) {
        body.pop();
    }
    Ok(body)
}

/// Reads and parses an urlencoded form body.
pub fn read_form(path: &str) -> Result<FieldSet, Box<dyn std::error::Error>> {
    Ok(FieldSet::from_form_body(&read_body(path)?))
}

/// Parses `--query`, accepting a bare query, `?query` or a full URL.
fn parse_query(raw: &str) -> FieldSet {
    if raw.contains("://") {
        if let Ok(url) = Url::parse(raw) {
            return FieldSet::from_query(url.query().unwrap_or(""));
        }
    }
    FieldSet::from_query(raw.strip_prefix('?').unwrap_or(raw))
}

/// Loads the field set carrying every field in `required`, preferring the query.
pub fn read_fields(
    source: &FieldSource,
    required: &[AuthField],
) -> Result<FieldSet, Box<dyn std::error::Error>> {
    let query = source.query.as_deref().map(parse_query).unwrap_or_default();
    let form = source.form.as_deref().map(read_form).transpose()?;

    let fields = select_field_set(query, form.as_ref(), required).ok_or_else(|| {
        let names: Vec<&str> = required.iter().map(|field| field.name()).collect();
        format!("no field source carries {}", names.join(", "))
    })?;
    tracing::debug!(fields = fields.len(), "read field set");
    Ok(fields)
}
