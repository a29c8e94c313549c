use crate::fields::{AuthField, SIGNABLE_FIELDS};
use crate::record::AssertionRecord;

/// Separator placed between `key=value` pairs.
pub const PAIR_SEPARATOR: char = '\n';

/// Returns the signable `(name, value)` pairs present in the record.
///
/// Pairs come out in byte-lexicographic order of the field name. Fields
/// that were not sent are skipped; `hash` never appears.
pub fn signable_pairs(record: &AssertionRecord) -> Vec<(&'static str, &str)> {
    SIGNABLE_FIELDS
        .iter()
        .filter_map(|&field| record.get(field).map(|value| (field.name(), value)))
        .collect()
}

/// Builds the check-string the remote provider signed.
///
/// Format: `key=value` per present field, sorted by key, joined with a
/// single `\n`, no trailing newline.
///
/// # Example
///
/// ```rust
/// use tgauth_canonical::{check_string, AssertionRecord, AuthField};
///
/// let record = AssertionRecord::new("42", "1700000000", "00")
///     .with(AuthField::FirstName, "Ann");
/// assert_eq!(check_string(&record), "auth_date=1700000000\nfirst_name=Ann\nid=42");
/// ```
pub fn check_string(record: &AssertionRecord) -> String {
    let mut out = String::new();
    for (i, (name, value)) in signable_pairs(record).into_iter().enumerate() {
        if i > 0 {
            out.push(PAIR_SEPARATOR);
        }
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Whether `field` would show up in the check-string for `record`.
pub fn is_signed(record: &AssertionRecord, field: AuthField) -> bool {
    field.is_signable() && record.get(field).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AssertionRecord {
        AssertionRecord::new("42", "1700000000", "deadbeef")
    }

    #[test]
    fn required_only() {
        assert_eq!(check_string(&record()), "auth_date=1700000000\nid=42");
    }

    #[test]
    fn all_fields_sorted() {
        let r = record()
            .with(AuthField::Username, "ann")
            .with(AuthField::PhotoUrl, "https://t.me/i/a.jpg")
            .with(AuthField::LastName, "Lee")
            .with(AuthField::FirstName, "Ann");
        assert_eq!(
            check_string(&r),
            "auth_date=1700000000\nfirst_name=Ann\nid=42\nlast_name=Lee\nphoto_url=https://t.me/i/a.jpg\nusername=ann"
        );
    }

    #[test]
    fn omitted_field_has_no_line() {
        let s = check_string(&record().with(AuthField::FirstName, "Ann"));
        assert!(!s.contains("photo_url"));
        assert!(!s.ends_with('\n'));
    }

    #[test]
    fn empty_value_keeps_its_line() {
        let s = check_string(&record().with(AuthField::PhotoUrl, ""));
        assert_eq!(s, "auth_date=1700000000\nid=42\nphoto_url=");
    }

    #[test]
    fn hash_is_never_signed() {
        let r = record();
        assert!(!check_string(&r).contains("deadbeef"));
        assert!(!is_signed(&r, AuthField::Hash));
        assert!(is_signed(&r, AuthField::Id));
        assert!(!is_signed(&r, AuthField::Username));
    }
}
