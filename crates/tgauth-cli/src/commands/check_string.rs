//! Check-string command implementation.

use tgauth_canonical::{check_string, decode, AuthField};

use crate::input::{read_fields, UNSIGNED_FIELDS};
use crate::FieldSource;

pub fn run(source: FieldSource) -> Result<(), Box<dyn std::error::Error>> {
    let mut fields = read_fields(&source, &UNSIGNED_FIELDS)?;
    if fields.first(AuthField::Hash.name()).is_none() {
        fields.set(AuthField::Hash.name(), "");
    }
    let record = decode(&fields).ok_or("field set is missing id or auth_date")?;
    println!("{}", check_string(&record));
    Ok(())
}
