//! Sign command implementation.

use tgauth_canonical::{decode, AuthField};
use tgauth_core::{sign, SigningKey, VerifierConfig};

use crate::input::{read_fields, UNSIGNED_FIELDS};
use crate::FieldSource;

pub fn run(source: FieldSource, bot_token: String, append: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = VerifierConfig::with_default_window(bot_token)?;
    let key = SigningKey::from_config(&config);

    let mut fields = read_fields(&source, &UNSIGNED_FIELDS)?;
    // The hash being computed is not part of the input.
    if fields.first(AuthField::Hash.name()).is_none() {
        fields.set(AuthField::Hash.name(), "");
    }
    let record = decode(&fields).ok_or("field set is missing id or auth_date")?;

    let hash = sign(&record, &key)?;
    if append {
        fields.set(AuthField::Hash.name(), hash);
        println!("{}", fields.encode());
    } else {
        println!("{}", hash);
    }
    Ok(())
}
