//! Folio site command line entry point.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use folio_common::FolioError;
use folio_config::{ConfigLoader, SiteConfig};
use folio_i18n::Locale;
use folio_site::{LeadSubmission, Site, SiteError};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "FOLIO_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Log level, overrides `logging.level` from the configuration
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved message tree and fallback keys for a locale
    Resolve {
        /// Locale tag, e.g. `es` or `fr-FR`
        locale: String,
    },
    /// Print the render context of a request path, e.g. `/fr/projects`
    Page {
        /// Request path
        path: String,
    },
    /// Report translation coverage for every locale
    Check,
    /// Print the sitemap XML
    Sitemap {
        /// Last-modified date stamped on every entry (YYYY-MM-DD)
        #[arg(long)]
        lastmod: Option<NaiveDate>,
    },
    /// Pick a locale from an Accept-Language header value
    Negotiate {
        /// Header value, e.g. `fr-CH, fr;q=0.9, en;q=0.8`
        header: String,
    },
    /// Format a value for a locale, falling back to the default locale
    Format {
        /// Locale tag
        locale: String,
        #[command(subcommand)]
        kind: FormatKind,
    },
    /// Validate and submit a contact-form lead
    Lead {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum FormatKind {
    /// RFC 3339 timestamp or YYYY-MM-DD date
    Date { value: String },
    /// Plain number
    Number {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
    /// Amount in the configured currency
    Currency {
        #[arg(allow_hyphen_values = true)]
        value: f64,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), FolioError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut config =
        ConfigLoader::load_from(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    folio_common::init_logging(&config.logging)?;

    match start(config, args.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!(
                category = e.category(),
                user_error = e.is_user_error(),
                "Command failed: {}",
                e
            );
            eprintln!("error: {e}");
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}

async fn start(config: SiteConfig, command: Command) -> Result<(), FolioError> {
    let site = Site::from_config(config)?;
    run(&site, command).await
}

async fn run(site: &Site, command: Command) -> Result<(), FolioError> {
    match command {
        Command::Resolve { locale } => {
            let resolved = site.resolver().resolve_tag(&locale)?;
            print_json(&resolved)?;
        }
        Command::Page { path } => {
            print_json(&site.page(&path)?)?;
        }
        Command::Check => {
            for locale in Locale::all() {
                let coverage = site.resolver().coverage(locale)?;
                println!(
                    "{:<8} {:>4}/{:<4} {:>5.1}%",
                    locale.code(),
                    coverage.translated,
                    coverage.total,
                    coverage.ratio() * 100.0
                );
            }
        }
        Command::Sitemap { lastmod } => {
            let sitemap = site.sitemap();
            let sitemap = match lastmod {
                Some(date) => sitemap.with_lastmod(date),
                None => sitemap,
            };
            print!("{}", sitemap.to_xml());
        }
        Command::Negotiate { header } => {
            println!("{}", site.router().negotiate(&header));
        }
        Command::Format { locale, kind } => {
            let formatter = site.formatter();
            let formatted = match kind {
                FormatKind::Date { value } => formatter.format_date(&locale, &value)?,
                FormatKind::Number { value } => formatter.format_number(&locale, value)?,
                FormatKind::Currency { value } => formatter.format_currency(&locale, value)?,
            };
            println!("{formatted}");
        }
        Command::Lead {
            name,
            email,
            message,
            company,
            project,
        } => {
            let lead = LeadSubmission {
                name,
                email,
                message,
                company,
                project,
            };
            let stored = site
                .lead_service()?
                .submit(lead)
                .await
                .map_err(SiteError::from)?;
            info!("Lead from {} submitted", stored.email);
            println!("Lead submitted");
        }
    }
    Ok(())
}
