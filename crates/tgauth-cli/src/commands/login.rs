//! Login command implementation.

use serde_json::json;
use tgauth_core::{CoreError, FixedClock, WidgetConfig};
use tgauth_store::{AuthRequest, FileAccountStore, LoginFlow, LoginOutcome, RegistrationPolicy};
use url::Url;

use crate::input::read_form;
use crate::output::format_json;
use crate::SecretArgs;

pub struct LoginArgs {
    pub uri: String,
    pub form: Option<String>,
    pub accounts: String,
    pub bot_username: String,
    pub secret: SecretArgs,
    pub allow_registration: bool,
    pub now: Option<i64>,
}

fn build_config(args: &LoginArgs) -> Result<WidgetConfig, CoreError> {
    Ok(WidgetConfig::new(
        &args.bot_username,
        args.secret.bot_token.clone(),
        args.secret.window,
    )?)
}

pub fn run(args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;
    let uri = Url::parse(&args.uri).map_err(CoreError::from)?;

    let mut request = AuthRequest::new(uri.clone());
    if let Some(path) = &args.form {
        request.form = Some(read_form(path)?);
    }

    let store = FileAccountStore::open(&args.accounts)
        .map_err(|e| format!("Failed to open account file {}: {}", args.accounts, e))?;
    let policy = if args.allow_registration {
        RegistrationPolicy::Allow
    } else {
        RegistrationPolicy::Deny
    };

    let mut flow = LoginFlow::new(config, store, policy);
    if let Some(now) = args.now {
        flow = flow.with_clock(FixedClock(now));
    }

    match flow.authenticate(&request) {
        LoginOutcome::NotAttempted => {
            let attrs = flow.widget_attributes(&uri);
            println!(
                "{}",
                format_json(&json!({ "status": "not_attempted", "widget": attrs }))
            );
            Ok(())
        }
        LoginOutcome::Authenticated { account, created } => {
            println!(
                "{}",
                format_json(&json!({
                    "status": "authenticated",
                    "created": created,
                    "account": account,
                }))
            );
            Ok(())
        }
        LoginOutcome::Failed(reason) => {
            tracing::debug!(code = reason.code(), "login failed");
            Err(reason.public_message().into())
        }
    }
}
