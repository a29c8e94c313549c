//! Verify command implementation.

use serde_json::json;
use tgauth_canonical::{decode, REQUIRED_FIELDS};
use tgauth_core::{Clock, CoreError, SystemClock, Verifier, VerifierConfig};

use crate::input::read_fields;
use crate::output::{format_auth_date, format_json, format_table_row, print_table_header};
use crate::{FieldSource, SecretArgs};

fn build_verifier(secret: SecretArgs) -> Result<Verifier, CoreError> {
    let config = VerifierConfig::new(secret.bot_token, secret.window)?;
    Ok(Verifier::new(&config))
}

pub fn run(
    source: FieldSource,
    secret: SecretArgs,
    now: Option<i64>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let verifier = build_verifier(secret)?;
    let fields = read_fields(&source, &REQUIRED_FIELDS)?;
    let record = decode(&fields).ok_or("field set is missing id, auth_date or hash")?;
    let now = now.unwrap_or_else(|| SystemClock.now_unix());

    let result = verifier.verify(&record, now);
    let (verdict, reason) = match &result {
        Ok(()) => ("verified", String::new()),
        Err(e) => ("rejected", e.reason().as_str().to_string()),
    };

    if json_output {
        let mut out = json!({
            "id": record.external_id,
            "auth_date": record.auth_date,
            "auth_time": format_auth_date(&record.auth_date),
            "verdict": verdict,
        });
        if let Err(e) = &result {
            out["reason"] = json!(e.reason());
            out["detail"] = json!(e.to_string());
        }
        println!("{}", format_json(&out));
    } else {
        print_table_header();
        println!(
            "{}",
            format_table_row(&record.external_id, &record.auth_date, verdict, &reason)
        );
    }

    if let Err(e) = result {
        tracing::info!(reason = e.reason().as_str(), "assertion rejected");
        std::process::exit(1);
    }
    Ok(())
}
