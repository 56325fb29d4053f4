// src/pipeline/run.rs

//! One end-to-end job search run.

use chrono::{DateTime, Local};

use crate::error::Result;
use crate::models::{Config, ResultRecord};
use crate::services::{Notifier, SearchProvider};

use super::filter::{FilterStats, RecordFilter};
use super::query::QueryBuilder;
use super::report::{Digest, DigestFormatter};

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Queries issued
    pub queries: usize,
    /// Queries that failed and contributed nothing
    pub failed_queries: usize,
    /// Records returned across all queries
    pub raw_results: usize,
    /// Filter counters
    pub filter: FilterStats,
    /// Records listed in the digest
    pub reported: usize,
    /// Whether the digest was delivered
    pub notified: bool,
}

/// Records gathered from a batch of queries.
#[derive(Debug, Default)]
pub struct Collected {
    pub records: Vec<ResultRecord>,
    pub failed_queries: usize,
}

/// Runs queries, filters, renders and notifies, in that order.
pub struct JobSearch<'a> {
    config: &'a Config,
    provider: &'a dyn SearchProvider,
    notifier: &'a dyn Notifier,
    recipient: &'a str,
    clock: fn() -> DateTime<Local>,
}

impl<'a> JobSearch<'a> {
    pub fn new(
        config: &'a Config,
        provider: &'a dyn SearchProvider,
        notifier: &'a dyn Notifier,
        recipient: &'a str,
    ) -> Self {
        Self {
            config,
            provider,
            notifier,
            recipient,
            clock: Local::now,
        }
    }

    /// Replace the wall clock used for the digest timestamp.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    /// Issue every query in order. A failed query is logged and skipped.
    pub fn collect(&self, queries: &[String]) -> Collected {
        let mut collected = Collected::default();

        for (i, query) in queries.iter().enumerate() {
            log::debug!("[{}/{}] Searching: {}", i + 1, queries.len(), query);
            match self.provider.search(query) {
                Ok(records) => {
                    log::debug!("  {} results", records.len());
                    collected.records.extend(records);
                }
                Err(error) => {
                    collected.failed_queries += 1;
                    log::warn!("Search error: {}", error);
                }
            }
        }
        collected
    }

    /// Search, filter and render, without sending.
    pub fn prepare(&self) -> (Digest, RunSummary) {
        let queries = QueryBuilder::from_config(&self.config.search).build();
        log::info!("Running {} search queries...", queries.len());

        let collected = self.collect(&queries);
        if collected.failed_queries > 0 {
            log::warn!(
                "{} of {} queries failed",
                collected.failed_queries,
                queries.len()
            );
        }

        let (matched, stats) =
            RecordFilter::from_config(self.config).apply_with_stats(&collected.records);
        log::info!(
            "{} results, {} matching after filter and dedupe",
            collected.records.len(),
            matched.len()
        );

        let limit = self.config.report.digest_limit.min(matched.len());
        let digest = DigestFormatter::from_config(&self.config.report)
            .render(&matched[..limit], &(self.clock)());

        let summary = RunSummary {
            queries: queries.len(),
            failed_queries: collected.failed_queries,
            raw_results: collected.records.len(),
            filter: stats,
            reported: digest.count,
            notified: false,
        };
        (digest, summary)
    }

    /// Run the full pipeline once.
    ///
    /// Search failures never fail the run. A send failure is logged and
    /// only returned when `notify.fail_on_error` is set.
    pub fn run(&self) -> Result<RunSummary> {
        let (digest, mut summary) = self.prepare();

        match self
            .notifier
            .send(&digest.subject, &digest.body, self.recipient)
        {
            Ok(()) => {
                summary.notified = true;
                log::info!("Email sent to {}", self.recipient);
            }
            Err(error) => {
                log::error!("Failed to send digest to {}: {}", self.recipient, error);
                if self.config.notify.fail_on_error {
                    return Err(error);
                }
            }
        }
        Ok(summary)
    }
}
