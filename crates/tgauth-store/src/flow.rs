//! Login flow: pick the assertion source, verify, resolve the account.
//!
//! Browser logins deliver the assertion in the redirect's query string;
//! direct logins post it as a form body. Whichever carries every required
//! field wins, query first.

use serde::Serialize;
use tgauth_canonical::{decode, AuthField, FieldSet, REQUIRED_FIELDS};
use tgauth_core::{
    sanitize_redirect_uri, Clock, SystemClock, Verdict, VerificationError, Verifier,
    WidgetConfig,
};
use url::Url;

use crate::account::Account;
use crate::error::StoreError;
use crate::resolve::{resolve_account, RegistrationPolicy, Resolution};
use crate::traits::AccountStore;

/// The only failure text end users ever see.
pub const PUBLIC_FAILURE_MESSAGE: &str = "authentication failed";

/// Incoming request as seen by the flow.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Full request URI, including the query string.
    pub uri: Url,
    /// Decoded form body, when the request had one.
    pub form: Option<FieldSet>,
}

impl AuthRequest {
    /// Request without a body.
    pub fn new(uri: Url) -> Self {
        Self { uri, form: None }
    }

    /// Attaches an urlencoded form body.
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.form = Some(FieldSet::from_form_body(body));
        self
    }
}

/// Chooses the field set carrying the assertion: the query string if it has
/// every required field, else the form body if it does, else nothing.
pub fn extract_field_set(request: &AuthRequest) -> Option<FieldSet> {
    let query = FieldSet::from_query(request.uri.query().unwrap_or(""));
    select_field_set(query, request.form.as_ref(), &REQUIRED_FIELDS)
}

/// Source selection behind [`extract_field_set`], with a caller-chosen
/// required set.
pub fn select_field_set(
    query: FieldSet,
    form: Option<&FieldSet>,
    required: &[AuthField],
) -> Option<FieldSet> {
    if query.contains_all(required) {
        return Some(query);
    }
    form.filter(|form| form.contains_all(required)).cloned()
}

/// Values the host's login page needs to render the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetAttributes {
    /// Bot the widget is bound to.
    pub bot_username: String,
    /// Where the widget should send the user back, without stale assertion parameters.
    pub redirect_uri: String,
}

/// Internal reason for a failed login. Never shown to end users.
#[derive(Debug)]
pub enum FailureReason {
    /// The assertion did not verify.
    Rejected(VerificationError),
    /// The identity is unknown and registration is denied.
    RegistrationDisabled,
    /// The account store failed.
    Store(StoreError),
}

impl FailureReason {
    /// Text to show end users; identical for every reason.
    pub fn public_message(&self) -> &'static str {
        PUBLIC_FAILURE_MESSAGE
    }

    /// Stable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            FailureReason::Rejected(e) => e.reason().as_str(),
            FailureReason::RegistrationDisabled => "registration_disabled",
            FailureReason::Store(_) => "store_error",
        }
    }
}

/// Result of one pass through the login flow.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The request carries no assertion; the host should render the widget.
    NotAttempted,
    /// The user is logged in.
    Authenticated {
        /// Resolved account.
        account: Account,
        /// Whether the account was provisioned by this login.
        created: bool,
    },
    /// The login failed.
    Failed(FailureReason),
}

/// Login flow bound to one widget configuration and account store.
pub struct LoginFlow<S> {
    config: WidgetConfig,
    verifier: Verifier,
    store: S,
    policy: RegistrationPolicy,
    clock: Box<dyn Clock>,
}

impl<S: AccountStore> LoginFlow<S> {
    /// Creates a flow using the wall clock.
    pub fn new(config: WidgetConfig, store: S, policy: RegistrationPolicy) -> Self {
        let verifier = Verifier::new(&config.verifier);
        Self {
            config,
            verifier,
            store,
            policy,
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// The account store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Attributes for rendering the widget on a page served at `request_uri`.
    pub fn widget_attributes(&self, request_uri: &Url) -> WidgetAttributes {
        WidgetAttributes {
            bot_username: self.config.bot_username.to_string(),
            redirect_uri: sanitize_redirect_uri(request_uri).to_string(),
        }
    }

    /// Runs the flow for one request.
    pub fn authenticate(&self, request: &AuthRequest) -> LoginOutcome {
        let Some(record) = extract_field_set(request).as_ref().and_then(decode) else {
            return LoginOutcome::NotAttempted;
        };

        let now = self.clock.now_unix();
        let assertion = match self.verifier.check(record, now) {
            Verdict::Verified(assertion) => assertion,
            Verdict::Rejected(e) => {
                if e.is_internal() {
                    tracing::error!(error = %e, "assertion verification failed internally");
                } else {
                    tracing::warn!(reason = e.reason().as_str(), "assertion rejected");
                }
                return LoginOutcome::Failed(FailureReason::Rejected(e));
            }
        };

        match resolve_account(&self.store, &assertion, self.policy) {
            Ok(Resolution::Existing(account)) => LoginOutcome::Authenticated {
                account,
                created: false,
            },
            Ok(Resolution::Created(account)) => LoginOutcome::Authenticated {
                account,
                created: true,
            },
            Ok(Resolution::RegistrationDisabled) => {
                LoginOutcome::Failed(FailureReason::RegistrationDisabled)
            }
            Err(e) => {
                tracing::error!(error = %e, "account resolution failed");
                LoginOutcome::Failed(FailureReason::Store(e))
            }
        }
    }
}
