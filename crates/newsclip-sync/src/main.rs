//! Newsclip Sync - incremental news-row transfer tool

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use newsclip_common::logging::{init_logging, LogConfig, LogLevel};
use newsclip_sync::config::SyncConfig;
use newsclip_sync::pipeline::SyncPipeline;
use newsclip_sync::storage::SheetsClient;
use newsclip_sync::timestamp::jst;
use newsclip_sync::window::SyncWindow;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "newsclip-sync")]
#[command(author, version, about = "Incremental news-row sync into date-bucketed sheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run one sync against the Sheets backend
    Run {
        /// Source spreadsheet document id
        #[arg(long, env = "NEWSCLIP_SPREADSHEET_ID")]
        spreadsheet_id: Option<String>,

        /// Sheets API bearer token
        #[arg(long, env = "NEWSCLIP_API_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Pin the run instant (RFC 3339); defaults to the current time
        #[arg(long)]
        at: Option<String>,
    },

    /// Print the sync window and bucket id for an instant
    Window {
        /// Instant to compute the window for (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("newsclip-sync".to_string())
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    init_logging(&log_config)?;

    match cli.command {
        Command::Run {
            spreadsheet_id,
            token,
            at,
        } => {
            let now = run_instant(at.as_deref())?;

            let mut config = SyncConfig::from_env()?;
            if let Some(id) = spreadsheet_id {
                config.spreadsheet_id = id;
            }
            if let Some(token) = token {
                config.api_token = Some(token);
            }
            let (_, api_token) = config.require_backend()?;
            let api_token = api_token.to_string();

            let source = SheetsClient::new(config.spreadsheet_id.clone(), api_token.clone())?;
            let destination =
                SheetsClient::new(config.destination_spreadsheet_id().to_string(), api_token)?;

            let report = SyncPipeline::new(source, destination, config).run(now).await?;
            info!(
                bucket = %report.bucket_id,
                scanned = report.scanned,
                appended = report.appended,
                duplicates = report.duplicates,
                out_of_window = report.out_of_window,
                header_written = report.header_written,
                "done"
            );
        },
        Command::Window { at } => {
            let now = run_instant(at.as_deref())?;
            let window = SyncWindow::compute(now);
            info!(
                bucket = %window.bucket_id,
                start = %window.start.format("%Y/%m/%d %H:%M:%S"),
                end = %window.end.format("%Y/%m/%d %H:%M:%S"),
                "computed sync window"
            );
        },
    }

    Ok(())
}

/// Resolve the run instant, normalized to UTC+9.
fn run_instant(at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&jst()))
            .with_context(|| format!("invalid --at instant '{}'", raw)),
        None => Ok(Utc::now().with_timezone(&jst())),
    }
}
