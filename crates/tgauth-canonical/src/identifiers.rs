use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of the bot the login widget is bound to (`[A-Za-z][A-Za-z0-9_]{3,31}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BotUsername(String);

impl BotUsername {
    /// Parses a validated bot username; a leading `@` is stripped.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let s = raw.trim();
        let s = s.strip_prefix('@').unwrap_or(s);
        if s.is_empty() {
            return Err(ValidationError::Blank {
                field: "BotUsername",
            });
        }
        if !Regex::new(r"^[A-Za-z][A-Za-z0-9_]{3,31}$")
            .expect("invalid regex")
            .is_match(s)
        {
            return Err(ValidationError::PatternMismatch {
                field: "BotUsername",
                value: raw,
            });
        }
        Ok(Self(s.to_owned()))
    }
}

impl AsRef<str> for BotUsername {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BotUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
