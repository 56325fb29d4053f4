// src/models/record.rs

//! Search result record.

use serde::{Deserialize, Serialize};

/// A search hit as returned by the provider.
///
/// Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl RawResult {
    /// Normalize into a record; `None` when the hit has no link.
    pub fn into_record(self) -> Option<ResultRecord> {
        ResultRecord::new(self.link?, self.title, self.snippet)
    }
}

/// A normalized search hit. The link is the dedupe key and report anchor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultRecord {
    /// Full URL of the posting
    pub link: String,

    /// Page title, if the provider returned one
    pub title: Option<String>,

    /// Result snippet, if the provider returned one
    pub snippet: Option<String>,
}

impl ResultRecord {
    /// Build a record, discarding hits without a link.
    ///
    /// Blank strings count as absent.
    pub fn new(
        link: impl Into<String>,
        title: Option<String>,
        snippet: Option<String>,
    ) -> Option<Self> {
        let link = link.into();
        if link.trim().is_empty() {
            return None;
        }

        Some(Self {
            link,
            title: non_blank(title),
            snippet: non_blank(snippet),
        })
    }

    /// Lowercased title and snippet, joined by a space.
    pub fn search_text(&self) -> String {
        [self.title.as_deref(), self.snippet.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Title for display.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("No title")
    }

    /// Snippet for display.
    pub fn display_snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or("")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
