//! Pipeline stages and entry points.
//!
//! - `QueryBuilder`: role × location query permutations
//! - `RecordFilter`: keyword gate and link dedupe
//! - `DigestFormatter`: plain-text digest
//! - `JobSearch`: runs the stages in order
//! - `run_job_search`: wires the production collaborators and runs once

pub mod filter;
pub mod query;
pub mod report;
pub mod run;

pub use filter::{FilterStats, RecordFilter};
pub use query::QueryBuilder;
pub use report::{Digest, DigestFormatter};
pub use run::{Collected, JobSearch, RunSummary};

use crate::config::Secrets;
use crate::error::Result;
use crate::models::Config;
use crate::services::{SerpApiClient, SmtpNotifier};

/// Validate configuration, then run the pipeline against SerpApi and SMTP.
///
/// Configuration problems are returned before any network activity.
pub fn run_job_search(config: &Config, secrets: &Secrets) -> Result<RunSummary> {
    config.validate()?;

    let provider = SerpApiClient::new(&config.search, &secrets.serpapi_key)?;
    let notifier = SmtpNotifier::new(&config.mail, secrets)?;

    JobSearch::new(config, &provider, &notifier, &secrets.recipient).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_recipient_stops_before_search() {
        let secrets = Secrets {
            serpapi_key: "serp-123456".to_string(),
            smtp_user: "bot@example.com".to_string(),
            smtp_pass: "hunter2".to_string(),
            recipient: "not an address".to_string(),
        };
        let err = run_job_search(&Config::default(), &secrets).unwrap_err();
        assert!(err.is_config());
    }
}
