// src/error.rs

//! Unified error handling for the job search application.

use std::fmt;

use thiserror::Error;

/// Result type alias for job search operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Search provider rejected or failed a query
    #[error("Search error for '{query}': {message}")]
    Search { query: String, message: String },

    /// Building or sending the digest email failed
    #[error("Mail error: {0}")]
    Mail(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a search error for a query.
    pub fn search(query: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Search {
            query: query.into(),
            message: message.to_string(),
        }
    }

    /// Create a mail error.
    pub fn mail(message: impl fmt::Display) -> Self {
        Self::Mail(message.to_string())
    }

    /// Whether this error must stop the run before any network activity.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Validation(_))
    }
}

impl From<lettre::address::AddressError> for AppError {
    fn from(err: lettre::address::AddressError) -> Self {
        Self::mail(format!("invalid address: {err}"))
    }
}

impl From<lettre::error::Error> for AppError {
    fn from(err: lettre::error::Error) -> Self {
        Self::mail(format!("failed to build message: {err}"))
    }
}

impl From<lettre::transport::smtp::Error> for AppError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::mail(err)
    }
}
