// src/models/mod.rs

//! Domain models for the job search application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod record;

// Re-export all public types
pub use config::{Config, FilterConfig, MailConfig, NotifyConfig, ReportConfig, SearchConfig};
pub use record::{RawResult, ResultRecord};
