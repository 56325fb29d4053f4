//! Application configuration structures.

use std::fs;
use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
///
/// Holds everything except secrets, which come from the environment
/// (see [`crate::config::Secrets`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Query permutations and provider request settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Keyword heuristics
    #[serde(default)]
    pub filter: FilterConfig,

    /// Digest rendering
    #[serde(default)]
    pub report: ReportConfig,

    /// Mail relay settings
    #[serde(default)]
    pub mail: MailConfig,

    /// Notification failure policy
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.search.locations.is_empty() {
            return Err(AppError::validation("search.locations is empty"));
        }
        if self.search.roles.is_empty() {
            return Err(AppError::validation("search.roles is empty"));
        }
        if self.search.include_qualifier && self.search.qualifier.trim().is_empty() {
            return Err(AppError::validation(
                "search.qualifier is empty but include_qualifier is set",
            ));
        }
        if self.search.max_results_per_query == 0 {
            return Err(AppError::validation(
                "search.max_results_per_query must be > 0",
            ));
        }
        if self.search.timeout_secs == 0 {
            return Err(AppError::validation("search.timeout_secs must be > 0"));
        }
        if self.search.user_agent.trim().is_empty() {
            return Err(AppError::validation("search.user_agent is empty"));
        }
        if self.filter.experience_keywords.is_empty() {
            return Err(AppError::validation("filter.experience_keywords is empty"));
        }
        if self.report.digest_limit == 0 {
            return Err(AppError::validation("report.digest_limit must be > 0"));
        }
        if StrftimeItems::new(&self.report.timestamp_format)
            .any(|item| matches!(item, Item::Error))
        {
            return Err(AppError::validation(format!(
                "report.timestamp_format '{}' is not a valid strftime format",
                self.report.timestamp_format
            )));
        }
        if self.mail.relay_host.trim().is_empty() {
            return Err(AppError::validation("mail.relay_host is empty"));
        }
        if self.mail.timeout_secs == 0 {
            return Err(AppError::validation("mail.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Query permutations and provider request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Locations, in query order
    #[serde(default = "defaults::locations")]
    pub locations: Vec<String>,

    /// Roles, in query order (also the role keywords of the filter)
    #[serde(default = "defaults::roles")]
    pub roles: Vec<String>,

    /// Emit the qualified variant of every query
    #[serde(default = "defaults::include_qualifier")]
    pub include_qualifier: bool,

    /// Qualifier inserted into the qualified variant
    #[serde(default = "defaults::qualifier")]
    pub qualifier: String,

    /// Seniority phrase present in every query
    #[serde(default = "defaults::seniority")]
    pub seniority: String,

    /// Provider endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Language hint (`hl`)
    #[serde(default = "defaults::language")]
    pub language: String,

    /// Google domain to search
    #[serde(default = "defaults::google_domain")]
    pub google_domain: String,

    /// Result cap per query
    #[serde(default = "defaults::max_results_per_query")]
    pub max_results_per_query: usize,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            locations: defaults::locations(),
            roles: defaults::roles(),
            include_qualifier: defaults::include_qualifier(),
            qualifier: defaults::qualifier(),
            seniority: defaults::seniority(),
            endpoint: defaults::endpoint(),
            language: defaults::language(),
            google_domain: defaults::google_domain(),
            max_results_per_query: defaults::max_results_per_query(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Keyword heuristics for the filter engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Substrings indicating entry-level seniority
    #[serde(default = "defaults::experience_keywords")]
    pub experience_keywords: Vec<String>,

    /// Drop records that mention none of the locations
    #[serde(default)]
    pub require_location: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            experience_keywords: defaults::experience_keywords(),
            require_location: false,
        }
    }
}

/// Digest rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum number of records in the digest
    #[serde(default = "defaults::digest_limit")]
    pub digest_limit: usize,

    /// Subject line prefix
    #[serde(default = "defaults::subject_prefix")]
    pub subject_prefix: String,

    /// chrono strftime format for the digest timestamp
    #[serde(default = "defaults::timestamp_format")]
    pub timestamp_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            digest_limit: defaults::digest_limit(),
            subject_prefix: defaults::subject_prefix(),
            timestamp_format: defaults::timestamp_format(),
        }
    }
}

/// Mail relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// STARTTLS relay host
    #[serde(default = "defaults::relay_host")]
    pub relay_host: String,

    /// Relay submission port
    #[serde(default = "defaults::relay_port")]
    pub relay_port: u16,

    /// Display name of the sender
    #[serde(default = "defaults::sender_name")]
    pub sender_name: String,

    /// Socket timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_host: defaults::relay_host(),
            relay_port: defaults::relay_port(),
            sender_name: defaults::sender_name(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// What a failed send means for the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Return the send error from the run (non-zero exit)
    #[serde(default)]
    pub fail_on_error: bool,
}

mod defaults {
    // Search defaults
    pub fn locations() -> Vec<String> {
        ["Bangalore", "Bengaluru", "Hyderabad", "Pune"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn roles() -> Vec<String> {
        [
            "DevOps Engineer",
            "Cloud Engineer",
            "DevOps",
            "Site Reliability Engineer",
            "SRE",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
    pub fn include_qualifier() -> bool {
        true
    }
    pub fn qualifier() -> String {
        "startup".into()
    }
    pub fn seniority() -> String {
        "entry level".into()
    }
    pub fn endpoint() -> String {
        "https://serpapi.com/search.json".into()
    }
    pub fn language() -> String {
        "en".into()
    }
    pub fn google_domain() -> String {
        "google.com".into()
    }
    pub fn max_results_per_query() -> usize {
        10
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobscout/0.1)".into()
    }

    // Filter defaults
    pub fn experience_keywords() -> Vec<String> {
        [
            "entry level",
            "0 years",
            "0-1",
            "0 to 1",
            "fresher",
            "0-1 years",
            "graduate",
            "new grad",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Report defaults
    pub fn digest_limit() -> usize {
        25
    }
    pub fn subject_prefix() -> String {
        "Daily Job Search".into()
    }
    pub fn timestamp_format() -> String {
        "%Y-%m-%d %H:%M".into()
    }

    // Mail defaults
    pub fn relay_host() -> String {
        "smtp.gmail.com".into()
    }
    pub fn relay_port() -> u16 {
        587
    }
    pub fn sender_name() -> String {
        "Job Bot".into()
    }
}
