// src/pipeline/report.rs

//! Digest rendering.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::models::{ReportConfig, ResultRecord};

const SEPARATOR_WIDTH: usize = 60;

/// A rendered digest ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
    /// Number of records in the body
    pub count: usize,
}

/// Renders filtered records into a plain-text digest.
#[derive(Debug, Clone)]
pub struct DigestFormatter {
    subject_prefix: String,
    timestamp_format: String,
}

impl DigestFormatter {
    pub fn new(subject_prefix: impl Into<String>, timestamp_format: impl Into<String>) -> Self {
        Self {
            subject_prefix: subject_prefix.into(),
            timestamp_format: timestamp_format.into(),
        }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(&config.subject_prefix, &config.timestamp_format)
    }

    /// Render the digest for `records` as of `now`.
    ///
    /// The caller truncates; every record passed in is listed.
    pub fn render<Tz>(&self, records: &[ResultRecord], now: &DateTime<Tz>) -> Digest
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Digest {
            subject: self.subject(records.len()),
            body: self.body(records, now),
            count: records.len(),
        }
    }

    /// Subject line for a digest of `count` records.
    pub fn subject(&self, count: usize) -> String {
        format!("{} - {} matches", self.subject_prefix, count)
    }

    /// Body text for `records` as of `now`.
    pub fn body<Tz>(&self, records: &[ResultRecord], now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let timestamp = now.format(&self.timestamp_format);

        if records.is_empty() {
            return format!("No matching jobs were found in today's search ({timestamp}).");
        }

        let mut lines = Vec::with_capacity(records.len() + 2);
        lines.push(format!(
            "{} results ({}): {} matches\n",
            self.subject_prefix,
            timestamp,
            records.len()
        ));
        lines.push("-".repeat(SEPARATOR_WIDTH));

        for (i, record) in records.iter().enumerate() {
            lines.push(format!(
                "{}. {}\n{}\n{}\n",
                i + 1,
                record.display_title(),
                record.display_snippet(),
                record.link
            ));
        }
        lines.join("\n")
    }
}

impl Default for DigestFormatter {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 8, 5, 0).unwrap()
    }

    fn record(link: &str, title: Option<&str>, snippet: Option<&str>) -> ResultRecord {
        ResultRecord::new(link, title.map(String::from), snippet.map(String::from)).unwrap()
    }

    #[test]
    fn test_empty_digest() {
        let digest = DigestFormatter::default().render(&[], &now());
        assert_eq!(
            digest.body,
            "No matching jobs were found in today's search (2026-03-14 08:05)."
        );
        assert_eq!(digest.subject, "Daily Job Search - 0 matches");
        assert_eq!(digest.count, 0);
    }

    #[test]
    fn test_entries() {
        let records = vec![
            record("https://a.io/1", Some("SRE fresher"), Some("Pune office")),
            record("https://b.io/2", None, None),
        ];
        let digest = DigestFormatter::default().render(&records, &now());

        let expected = format!(
            "Daily Job Search results (2026-03-14 08:05): 2 matches\n\n{}\n\
             1. SRE fresher\nPune office\nhttps://a.io/1\n\n\
             2. No title\n\nhttps://b.io/2\n",
            "-".repeat(60)
        );
        assert_eq!(digest.body, expected);
        assert_eq!(digest.subject, "Daily Job Search - 2 matches");
    }

    #[test]
    fn test_numbering_follows_input_order() {
        let records: Vec<_> = (0..12)
            .map(|i| record(&format!("https://x.io/{i}"), Some("DevOps fresher"), None))
            .collect();
        let body = DigestFormatter::default().body(&records, &now());

        assert!(body.contains("1. DevOps fresher\n\nhttps://x.io/0\n"));
        assert!(body.contains("12. DevOps fresher\n\nhttps://x.io/11\n"));
        assert!(!body.contains("13. "));
    }

    #[test]
    fn test_custom_format() {
        let formatter = DigestFormatter::new("Jobs", "%d/%m/%Y");
        let body = formatter.body(&[], &now());
        assert!(body.ends_with("(14/03/2026)."));
        assert_eq!(formatter.subject(3), "Jobs - 3 matches");
    }
}
