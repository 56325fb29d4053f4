//! Service layer for the job search application.
//!
//! This module contains the adapters for the external collaborators:
//! - Web search (`SearchProvider`, `SerpApiClient`)
//! - Digest delivery (`Notifier`, `SmtpNotifier`)

mod notifier;
mod search;

pub use notifier::{Notifier, SmtpNotifier};
pub use search::{SearchProvider, SerpApiClient, parse_results};
