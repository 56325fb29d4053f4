// src/config.rs

//! Secrets loaded from the environment.
//!
//! Non-secret settings live in the TOML [`Config`](crate::models::Config);
//! credentials and the recipient come from environment variables (or a
//! `.env` file in the working directory).

use std::fmt;

use crate::error::{AppError, Result};

pub const SERPAPI_KEY: &str = "SERPAPI_KEY";
pub const SMTP_USER: &str = "SMTP_USER";
pub const SMTP_PASS: &str = "SMTP_PASS";
pub const RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";

/// Recipient used when `RECIPIENT_EMAIL` is unset.
pub const DEFAULT_RECIPIENT: &str = "jobs@example.com";

/// Credentials and addressing, validated once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub serpapi_key: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub recipient: String,
}

impl Secrets {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| AppError::config(format!("{key} not configured")))
        };

        let secrets = Self {
            serpapi_key: require(SERPAPI_KEY)?,
            smtp_user: require(SMTP_USER)?,
            smtp_pass: require(SMTP_PASS)?,
            recipient: get(RECIPIENT_EMAIL).unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
        };

        secrets.log_keys();
        Ok(secrets)
    }

    fn log_keys(&self) {
        log::debug!("Secrets loaded:");
        log::debug!("  {}: {}", SERPAPI_KEY, preview(&self.serpapi_key));
        log::debug!("  {}: {}", SMTP_USER, self.smtp_user);
        log::debug!("  {}: {}", RECIPIENT_EMAIL, self.recipient);
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("serpapi_key", &preview(&self.serpapi_key))
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &"<redacted>")
            .field("recipient", &self.recipient)
            .finish()
    }
}

fn preview(val: &str) -> String {
    let n = val.chars().take(4).map(char::len_utf8).sum::<usize>();
    format!("{}...({} chars)", &val[..n], val.chars().count())
}
