//! relsheet - sorted release artifact report for a download page
//!
//! Fetches the release manifest, keeps the binary artifacts users download
//! and prints them newest-first. stdout carries the report and nothing
//! else; logs and the error line go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use relsheet_core::manifest::{FileSource, ManifestSource};
use relsheet_core::{report, Config, Pipeline, Report};

mod table;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of records
    Json,
    /// Human-readable table
    Table,
}

#[derive(Parser, Debug)]
#[clap(
    name = "relsheet",
    about = "Fetch a release manifest and print its downloadable artifacts, newest first",
    version
)]
struct Cli {
    /// Manifest endpoint URL
    #[clap(long)]
    endpoint: Option<String>,

    /// User-Agent header sent with the manifest request
    #[clap(long)]
    user_agent: Option<String>,

    /// Overall fetch deadline in seconds
    #[clap(long)]
    timeout: Option<u64>,

    /// Read the manifest from a file instead of the network ("-" for stdin)
    #[clap(long, conflicts_with_all = ["endpoint", "user_agent", "timeout"])]
    input: Option<PathBuf>,

    /// Configuration file (YAML)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Leave http:// download URLs as published
    #[clap(long)]
    keep_insecure_urls: bool,

    /// Output format
    #[clap(long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Set log level (logs go to stderr)
    #[clap(long, default_value = "error")]
    log_level: LogLevel,

    /// Emit logs as JSON lines
    #[clap(long)]
    log_json: bool,
}

impl Cli {
    /// Resolve the config file and apply flag overrides on top
    fn resolve_config(&self) -> Result<Config> {
        let mut config =
            Config::resolve(self.config.as_deref()).context("Failed to load configuration")?;

        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = endpoint.clone();
        }
        if let Some(user_agent) = &self.user_agent {
            config.source.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.timeout {
            config.source.timeout_seconds = timeout;
        }
        if self.keep_insecure_urls {
            config.pipeline.upgrade_insecure_urls = false;
        }

        Ok(config)
    }
}

/// Initialize tracing
///
/// `RUST_LOG` wins over `--log-level` when set.
fn initialize_tracing(log_level: &LogLevel, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(io::stderr) // stdout is reserved for the report
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr) // stdout is reserved for the report
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level, cli.log_json);

    if let Err(e) = run(cli).await {
        // One line, whatever went wrong
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    debug!("Resolved configuration: {:?}", config);

    let source: Box<dyn ManifestSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => http_source(config.source)?,
    };

    let report = Pipeline::new(source, config.pipeline).run().await?;
    let stats = report.stats();
    info!(
        "Report has {} artifacts ({} of {} manifest records dropped)",
        stats.kept, stats.dropped, stats.decoded
    );

    let rendered = render(&report, cli.format)?;
    let stdout = io::stdout();
    report::emit(stdout.lock(), &rendered)?;

    Ok(())
}

/// Render the whole report before anything reaches stdout
fn render(report: &Report, format: OutputFormat) -> Result<Vec<u8>> {
    let rendered = match format {
        OutputFormat::Csv => report::to_csv(report.records())?,
        OutputFormat::Json => report::to_json(report.records())?,
        OutputFormat::Table => table::render(report.records()),
    };
    Ok(rendered)
}

#[cfg(feature = "http")]
fn http_source(config: relsheet_core::SourceConfig) -> Result<Box<dyn ManifestSource>> {
    let source = relsheet_core::manifest::HttpSource::new(config)?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "http"))]
fn http_source(_config: relsheet_core::SourceConfig) -> Result<Box<dyn ManifestSource>> {
    anyhow::bail!("HTTP support is not enabled. Rebuild with --features http or pass --input")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_required() {
        let cli = Cli::try_parse_from(["relsheet"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Csv);
        assert!(cli.input.is_none());
        assert!(!cli.keep_insecure_urls);
        assert_eq!(cli.log_level.to_filter_directive(), "error");
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "source:\n  endpoint: https://file.example/dl\n  timeout_seconds: 20\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "relsheet",
            "--config",
            path.to_str().unwrap(),
            "--timeout",
            "5",
            "--keep-insecure-urls",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.source.endpoint, "https://file.example/dl");
        assert_eq!(config.source.timeout_seconds, 5);
        assert!(!config.pipeline.upgrade_insecure_urls);
    }

    #[test]
    fn test_input_conflicts_with_network_flags() {
        let result = Cli::try_parse_from([
            "relsheet",
            "--input",
            "manifest.json",
            "--endpoint",
            "https://example.com",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_values() {
        let cli = Cli::try_parse_from(["relsheet", "--format", "table"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(Cli::try_parse_from(["relsheet", "--format", "xml"]).is_err());
    }
}
