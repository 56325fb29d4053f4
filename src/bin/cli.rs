//! jobscout CLI
//!
//! With no arguments, runs the search pipeline once and mails the digest.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobscout::{
    config::Secrets,
    error::Result,
    models::Config,
    pipeline::{self, JobSearch, QueryBuilder},
    services::{SerpApiClient, SmtpNotifier},
};

/// jobscout - Daily entry-level job search digest
#[derive(Parser, Debug)]
#[command(
    name = "jobscout",
    version,
    about = "Searches for entry-level job postings and emails a digest"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search, filter and mail the digest (default)
    Run {
        /// Print the digest instead of mailing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the generated search queries
    Queries,

    /// Validate configuration and environment secrets
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stdout)
        .init();
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command.unwrap_or(Command::Run { dry_run: false }) {
        Command::Run { dry_run: false } => {
            let secrets = Secrets::from_env().inspect_err(|e| log::error!("{}", e))?;
            let summary = pipeline::run_job_search(&config, &secrets)
                .inspect_err(|e| log::error!("{}", e))?;

            log::info!(
                "Done: {} queries ({} failed), {} results, {} reported, notified: {}",
                summary.queries,
                summary.failed_queries,
                summary.raw_results,
                summary.reported,
                summary.notified
            );
        }

        Command::Run { dry_run: true } => {
            config.validate().inspect_err(|e| log::error!("{}", e))?;
            let secrets = Secrets::from_env().inspect_err(|e| log::error!("{}", e))?;
            let provider = SerpApiClient::new(&config.search, &secrets.serpapi_key)?;
            let notifier = SmtpNotifier::new(&config.mail, &secrets)?;

            let (digest, summary) =
                JobSearch::new(&config, &provider, &notifier, &secrets.recipient).prepare();

            println!("To: {}", secrets.recipient);
            println!("Subject: {}\n", digest.subject);
            println!("{}", digest.body);
            log::info!(
                "Dry run: {} of {} matches would be sent",
                summary.reported,
                summary.filter.kept
            );
        }

        Command::Queries => {
            for query in QueryBuilder::from_config(&config.search).build() {
                println!("{query}");
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");

            if let Err(e) = Secrets::from_env() {
                log::error!("Environment validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Environment OK");

            log::info!("All validations passed!");
        }
    }

    Ok(())
}
