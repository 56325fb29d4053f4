// src/pipeline/filter.rs

//! Keyword filtering and link dedupe.
//!
//! A record survives when its title/snippet text mentions an entry-level
//! marker and one of the configured roles. Location mentions are only
//! enforced when `require_location` is set; otherwise they are counted
//! and reported at debug level.

use std::collections::HashSet;

use crate::models::{Config, ResultRecord};

/// Substrings that always count as an entry-level marker.
const ENTRY_MARKERS: [&str; 2] = ["entry", "fresher"];

/// Counters from one filtering pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Records examined
    pub input: usize,
    /// Records without an entry-level marker
    pub no_experience: usize,
    /// Records without a role keyword
    pub no_role: usize,
    /// Keyword matches that mention none of the locations
    pub no_location: usize,
    /// Matches dropped because their link was already seen
    pub duplicates: usize,
    /// Records kept
    pub kept: usize,
}

/// Keyword filter with link dedupe.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    experience: Vec<String>,
    roles: Vec<String>,
    locations: Vec<String>,
    require_location: bool,
}

impl RecordFilter {
    /// Create a filter. Keywords are matched case-insensitively.
    pub fn new(experience: &[String], roles: &[String], locations: &[String]) -> Self {
        Self {
            experience: lowercase_all(experience),
            roles: lowercase_all(roles),
            locations: lowercase_all(locations),
            require_location: false,
        }
    }

    /// Create a filter from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.filter.experience_keywords,
            &config.search.roles,
            &config.search.locations,
        )
        .require_location(config.filter.require_location)
    }

    /// Drop records that mention none of the locations.
    pub fn require_location(mut self, require: bool) -> Self {
        self.require_location = require;
        self
    }

    /// Filter and dedupe, preserving discovery order.
    pub fn apply(&self, records: &[ResultRecord]) -> Vec<ResultRecord> {
        self.apply_with_stats(records).0
    }

    /// Filter and dedupe, also returning per-stage counters.
    pub fn apply_with_stats(&self, records: &[ResultRecord]) -> (Vec<ResultRecord>, FilterStats) {
        let mut stats = FilterStats {
            input: records.len(),
            ..FilterStats::default()
        };
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for record in records {
            let text = record.search_text();

            if !self.has_experience(&text) {
                stats.no_experience += 1;
                continue;
            }
            if !contains_any(&text, &self.roles) {
                stats.no_role += 1;
                continue;
            }
            if !contains_any(&text, &self.locations) {
                stats.no_location += 1;
                if self.require_location {
                    continue;
                }
            }

            if seen.insert(record.link.as_str()) {
                kept.push(record.clone());
            } else {
                stats.duplicates += 1;
            }
        }

        stats.kept = kept.len();
        if stats.no_location > 0 && !self.require_location {
            log::debug!(
                "{} matching records mention no configured location (kept)",
                stats.no_location
            );
        }
        (kept, stats)
    }

    fn has_experience(&self, text: &str) -> bool {
        contains_any(text, &self.experience) || ENTRY_MARKERS.iter().any(|m| text.contains(m))
    }
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| text.contains(n.as_str()))
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, title: &str, snippet: &str) -> ResultRecord {
        ResultRecord::new(link, Some(title.to_string()), Some(snippet.to_string())).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn filter() -> RecordFilter {
        RecordFilter::new(
            &strings(&["0-1 years", "graduate", "new grad"]),
            &strings(&["DevOps", "SRE", "Cloud Engineer"]),
            &strings(&["Bangalore", "Pune"]),
        )
    }

    #[test]
    fn test_mixed_batch() {
        let input = vec![
            record("a", "DevOps Engineer fresher Bangalore", ""),
            record("a", "duplicate", ""),
            record("b", "Senior DevOps Lead", "10 years experience"),
        ];

        let output = filter().apply(&input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].link, "a");
        assert_eq!(
            output[0].title.as_deref(),
            Some("DevOps Engineer fresher Bangalore")
        );
    }

    #[test]
    fn test_requires_experience_marker() {
        let input = vec![
            record("a", "DevOps Engineer Pune", "Join our team"),
            record("b", "SRE", "Senior role, Bangalore"),
        ];
        assert!(filter().apply(&input).is_empty());
    }

    #[test]
    fn test_entry_substring_counts() {
        let input = vec![
            record("a", "Entry-level SRE", ""),
            record("b", "Cloud Engineer", "Freshers welcome"),
            record("c", "SRE", "New Grad program"),
        ];
        let output = filter().apply(&input);
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn test_requires_role() {
        let input = vec![record("a", "Data Analyst fresher", "Pune")];
        assert!(filter().apply(&input).is_empty());
    }

    #[test]
    fn test_role_match_is_case_insensitive() {
        let input = vec![record("a", "devops intern", "FRESHER")];
        assert_eq!(filter().apply(&input).len(), 1);
    }

    #[test]
    fn test_location_not_enforced_by_default() {
        let input = vec![
            record("a", "DevOps fresher", "Remote"),
            record("b", "DevOps fresher", "Pune"),
        ];
        let (output, stats) = filter().apply_with_stats(&input);
        assert_eq!(output.len(), 2);
        assert_eq!(stats.no_location, 1);
    }

    #[test]
    fn test_location_enforced_when_required() {
        let input = vec![
            record("a", "DevOps fresher", "Remote"),
            record("b", "DevOps fresher", "Pune"),
        ];
        let output = filter().require_location(true).apply(&input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].link, "b");
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let input = vec![
            record("x", "SRE fresher", "first"),
            record("y", "SRE fresher", "other"),
            record("x", "SRE fresher", "second"),
            record("y", "SRE fresher", "third"),
        ];
        let (output, stats) = filter().apply_with_stats(&input);
        let links: Vec<_> = output.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["x", "y"]);
        assert_eq!(output[0].snippet.as_deref(), Some("first"));
        assert_eq!(output[1].snippet.as_deref(), Some("other"));
        assert_eq!(stats.duplicates, 2);
    }

    #[test]
    fn test_duplicate_of_excluded_record_can_survive() {
        let input = vec![
            record("x", "Senior SRE", "Pune"),
            record("x", "SRE fresher", "Pune"),
        ];
        let output = filter().apply(&input);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].title.as_deref(), Some("SRE fresher"));
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            record("a", "DevOps fresher", "Pune"),
            record("b", "Staff SRE", ""),
            record("a", "DevOps fresher again", ""),
            record("c", "Cloud Engineer", "0-1 years"),
            record("d", "Cloud Engineer", "Remote graduate"),
        ];
        let f = filter();
        let once = f.apply(&input);
        let twice = f.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_title_and_snippet() {
        let bare = ResultRecord::new("a", None, None).unwrap();
        let snippet_only =
            ResultRecord::new("b", None, Some("SRE fresher opening".into())).unwrap();
        let output = filter().apply(&[bare, snippet_only]);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].link, "b");
    }

    #[test]
    fn test_default_keywords_match_inside_numbers() {
        // "0 years" is a plain substring, so "10 years" carries it.
        let f = RecordFilter::from_config(&Config::default());
        let input = vec![record("b", "Senior DevOps Lead", "10 years experience")];
        assert_eq!(f.apply(&input).len(), 1);
    }

    #[test]
    fn test_padded_keyword_keeps_padding() {
        let f = RecordFilter::new(&strings(&[" 0 years", "  "]), &strings(&["DevOps"]), &[]);
        let input = vec![
            record("b", "Senior DevOps Lead", "10 years experience"),
            record("c", "DevOps Engineer", "0 years experience"),
            record("d", "DevOps Engineer", "20 years"),
        ];
        let output = f.apply(&input);
        let links: Vec<_> = output.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, vec!["c"]);
    }

    #[test]
    fn test_stats_counts() {
        let input = vec![
            record("a", "Senior SRE", ""),
            record("b", "Accountant fresher", ""),
            record("c", "SRE fresher", "Pune"),
        ];
        let (_, stats) = filter().apply_with_stats(&input);
        assert_eq!(
            stats,
            FilterStats {
                input: 3,
                no_experience: 1,
                no_role: 1,
                no_location: 0,
                duplicates: 0,
                kept: 1,
            }
        );
    }
}
