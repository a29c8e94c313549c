//! Operator configuration for the verifier and the login widget.
//!
//! Construction fails closed: a blank secret or a non-positive freshness
//! window is an error, never a silently disabled check.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU64;

use tgauth_canonical::{BotUsername, ValidationError};
use thiserror::Error;

/// Freshness window used when none is configured.
pub const DEFAULT_FRESHNESS_WINDOW_SECONDS: i64 = 60;

/// Setting name holding the application secret (the bot token).
pub const BOT_TOKEN_SETTING: &str = "telegram_bot_token";
/// Setting name holding the bot username.
pub const BOT_USERNAME_SETTING: &str = "telegram_bot_username";
/// Setting name holding the freshness window in seconds.
pub const AUTH_TIME_DELTA_SETTING: &str = "telegram_auth_time_delta";

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("{0} not configured")]
    MissingSetting(&'static str),
    /// The application secret is empty or whitespace only.
    #[error("application secret must not be blank")]
    BlankSecret,
    /// The freshness window is zero or negative.
    #[error("freshness window must be greater than 0 (got {0})")]
    NonPositiveWindow(i64),
    /// The freshness window is not an integer.
    #[error("freshness window ('{0}') is not an integer")]
    InvalidWindow(String),
    /// The bot username is malformed.
    #[error("invalid bot username: {0}")]
    BotUsername(#[from] ValidationError),
}

/// Opaque application secret. `Debug` never shows the value and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApplicationSecret(String);

impl ApplicationSecret {
    /// Wraps a secret, rejecting blank values.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::BlankSecret);
        }
        Ok(Self(secret))
    }

    /// Raw secret bytes, for key derivation only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApplicationSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApplicationSecret(<redacted>)")
    }
}

/// Process-wide verifier configuration, immutable once built.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    application_secret: ApplicationSecret,
    freshness_window: NonZeroU64,
}

impl VerifierConfig {
    /// Validates and builds a configuration.
    pub fn new(
        application_secret: impl Into<String>,
        freshness_window_seconds: i64,
    ) -> Result<Self, ConfigError> {
        let application_secret = ApplicationSecret::new(application_secret)?;
        let freshness_window = u64::try_from(freshness_window_seconds)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(ConfigError::NonPositiveWindow(freshness_window_seconds))?;
        Ok(Self {
            application_secret,
            freshness_window,
        })
    }

    /// Builds a configuration with the default 60 second window.
    pub fn with_default_window(application_secret: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(application_secret, DEFAULT_FRESHNESS_WINDOW_SECONDS)
    }

    /// The application secret.
    pub fn application_secret(&self) -> &ApplicationSecret {
        &self.application_secret
    }

    /// Maximum accepted age of `auth_date`, in seconds.
    pub fn freshness_window_seconds(&self) -> u64 {
        self.freshness_window.get()
    }
}

/// Full widget configuration: what the login page shows plus what the verifier needs.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Bot the widget is bound to.
    pub bot_username: BotUsername,
    /// Verification settings.
    pub verifier: VerifierConfig,
}

impl WidgetConfig {
    /// Validates and builds a widget configuration.
    pub fn new(
        bot_username: &str,
        application_secret: impl Into<String>,
        freshness_window_seconds: i64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            bot_username: BotUsername::parse(bot_username)?,
            verifier: VerifierConfig::new(application_secret, freshness_window_seconds)?,
        })
    }

    /// Builds a configuration from a flat settings map.
    ///
    /// Reads [`BOT_TOKEN_SETTING`], [`BOT_USERNAME_SETTING`] and
    /// [`AUTH_TIME_DELTA_SETTING`]. Only the window may be absent, in which
    /// case [`DEFAULT_FRESHNESS_WINDOW_SECONDS`] applies.
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            settings
                .get(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingSetting(name))
        };

        let token = required(BOT_TOKEN_SETTING)?;
        let username = required(BOT_USERNAME_SETTING)?;
        let window = match settings.get(AUTH_TIME_DELTA_SETTING) {
            None => DEFAULT_FRESHNESS_WINDOW_SECONDS,
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::MissingSetting(AUTH_TIME_DELTA_SETTING))
            }
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidWindow(raw.clone()))?,
        };

        Self::new(username, token.clone(), window)
    }
}
