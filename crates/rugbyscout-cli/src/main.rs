//! rugbyscout - find rugby on TV listings and fixture calendars.

/// Application configuration (TOML).
mod config;
/// Console report rendering.
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};
use crate::render::{render_events_report, render_rugbypass_notice, render_tv_report};
use rugbyscout_api::calendar::{CalendarClient, events_in_window};
use rugbyscout_api::epg::{EpgChannel, EpgClient, collect_rugby_matches};
use rugbyscout_db::{init_store, list_channels, open_store, resolve_store_path};

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Default log filter.
const DEFAULT_FILTER: &str = "info";

/// Log filter with `--verbose`.
const VERBOSE_FILTER: &str = "info,rugbyscout=debug,rugbyscout_api=debug,rugbyscout_db=debug";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Command to run.
    #[arg(value_enum, default_value_t = Command::Tv)]
    command: Command,

    /// Show diagnostic output.
    #[arg(short, long)]
    verbose: bool,

    /// Number of days to check (default depends on the command).
    #[arg(short, long)]
    days: Option<u32>,

    /// Override config/data directory.
    #[arg(long)]
    dir: Option<PathBuf>,
}

/// Available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Command {
    /// Rugby broadcasts on the stored channels.
    Tv,
    /// Upcoming fixtures from the calendar feeds.
    Events,
    /// RugbyPass TV check (not yet implemented).
    Rugbypass,
    /// Create and seed the channel store.
    InitDb,
}

/// Logs report lines at info level.
fn emit(lines: &[String]) {
    for line in lines {
        tracing::info!("{line}");
    }
}

/// Runs the `tv` command.
///
/// # Errors
///
/// Returns an error if the channel store is missing or unreadable, or the
/// EPG client cannot be built.
#[instrument(skip_all)]
async fn run_tv(config: &AppConfig, days: u32, dir: Option<&PathBuf>) -> Result<()> {
    let store_path = resolve_store_path(dir)?;
    let conn = open_store(&store_path)?;
    let channels: Vec<EpgChannel> = list_channels(&conn)?
        .into_iter()
        .map(|c| EpgChannel {
            name: c.display_name(),
            channel_id: c.channel_id,
        })
        .collect();
    drop(conn);

    tracing::info!(
        "📺 Checking {} channels for the next {days} day(s)...",
        channels.len()
    );

    let client = EpgClient::builder()
        .endpoint(config.epg_endpoint()?)
        .lang(config.epg.lang.clone())
        .transport(config.transport.to_transport(USER_AGENT))
        .strategies(config.transport.strategies.clone())
        .build()
        .context("failed to build EPG client")?;

    let today = Local::now().date_naive();
    let matches = collect_rugby_matches(&client, &channels, today, days).await;

    emit(&render_tv_report(&matches));
    Ok(())
}

/// Runs the `events` command.
///
/// # Errors
///
/// Returns an error if a feed URL is invalid or the client cannot be built.
#[instrument(skip_all)]
async fn run_events(config: &AppConfig, days: u32) -> Result<()> {
    let client = CalendarClient::new(
        config.transport.to_transport(USER_AGENT),
        config.transport.strategies.clone(),
    )
    .context("failed to build calendar client")?;

    let mut events = Vec::new();
    for feed in &config.calendar.feeds {
        let url = feed.parsed_url()?;
        tracing::info!("📅 Fetching rugby calendar ({})...", feed.name);
        events.extend(client.fetch_events(&feed.name, &url).await);
    }

    let today = Local::now().date_naive();
    let upcoming = events_in_window(events, today, days);

    emit(&render_events_report(&upcoming, days));
    Ok(())
}

/// Runs the `rugbypass` command. Performs no network I/O.
fn run_rugbypass(days: u32) {
    emit(&render_rugbypass_notice(days));
}

/// Runs the `init-db` command.
///
/// Seeds the channel store and writes the default config file when none
/// exists yet.
///
/// # Errors
///
/// Returns an error if the store or config file cannot be written.
#[instrument(skip_all)]
fn run_init_db(config: &AppConfig, dir: Option<&PathBuf>) -> Result<()> {
    let store_path = resolve_store_path(dir)?;
    let (conn, inserted) = init_store(&store_path, &config.channels.to_seeds())?;
    tracing::info!(
        "Channel store ready: {} ({inserted} added)",
        store_path.display()
    );

    let channels = list_channels(&conn)?;
    tracing::info!("Channels ({}):", channels.len());
    for ch in &channels {
        tracing::info!("  {:>7}  {}", ch.channel_id, ch.display_name());
    }

    let config_path = resolve_config_path(dir)?;
    if !config_path.exists() {
        config.save(&config_path)?;
        tracing::info!("Wrote default config: {}", config_path.display());
    }
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if configuration is unusable or the channel store is
/// missing.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let config_path = resolve_config_path(cli.dir.as_ref())?;
    let config = AppConfig::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "Configuration loaded");

    match cli.command {
        Command::Tv => {
            let days = cli.days.unwrap_or(config.days.tv);
            run_tv(&config, days, cli.dir.as_ref()).await
        }
        Command::Events => {
            let days = cli.days.unwrap_or(config.days.events);
            run_events(&config, days).await
        }
        Command::Rugbypass => {
            run_rugbypass(cli.days.unwrap_or(config.days.rugbypass));
            Ok(())
        }
        Command::InitDb => run_init_db(&config, cli.dir.as_ref()),
    }
}
