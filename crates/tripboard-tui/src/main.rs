//! `tripboard`: terminal trip planner.
//!
//! Built on [ratatui](https://ratatui.rs) over the presenters in
//! `tripboard-core`. Points come from a configured points service, or
//! from an in-memory demo source when none is configured.
//!
//! Logs are written to a file (default `/tmp/tripboard.log`) so they
//! never land on the terminal the board is drawn on.

mod action;
mod app;
mod board;
mod bootstrap;
mod event;
mod form;
mod format;
mod scene;
mod summary;
mod theme;
mod tui;
mod views;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use secrecy::SecretString;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tripboard_config::{Config, ConfigError};
use tripboard_core::{DemoSource, PointsApi, ServiceConfig};

use crate::app::App;

/// Plan a trip from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tripboard", version, about)]
struct Cli {
    /// Points service root (e.g., https://trip.example.com/big-trip)
    #[arg(short = 'e', long, env = "TRIPBOARD_ENDPOINT")]
    endpoint: Option<String>,

    /// Authorization token for the points service
    #[arg(short = 'a', long, env = "TRIPBOARD_AUTHORIZATION", hide_env_values = true)]
    authorization: Option<String>,

    /// Config profile to use (defaults to the configured default)
    #[arg(short = 'p', long)]
    profile: Option<String>,

    /// Use generated in-memory data instead of a service
    #[arg(long)]
    demo: bool,

    /// Simulated demo latency per request, in milliseconds
    #[arg(long, default_value_t = 300)]
    demo_latency_ms: u64,

    /// Share of demo mutations that fail, from 0.0 to 1.0
    #[arg(long, default_value_t = 0.0)]
    demo_failure_rate: f64,

    /// Log file path (defaults to /tmp/tripboard.log)
    #[arg(long, default_value = "/tmp/tripboard.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-based tracing. The guard must live as long as the app so
/// buffered lines get flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tripboard={log_level},tripboard_core={log_level},tripboard_api={log_level}"
        ))
    });

    let log_dir = cli.log_file.parent().unwrap_or(Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("tripboard.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Where points come from.
enum Source {
    Service(ServiceConfig),
    Demo,
}

/// Priority: `--demo`, then CLI flags, then the config profile. Without
/// flags or a configured profile the demo source is used.
fn resolve_source(cli: &Cli, cfg: &Config) -> Result<Source> {
    if cli.demo {
        return Ok(Source::Demo);
    }

    if let Some(endpoint) = &cli.endpoint {
        let authorization = cli
            .authorization
            .clone()
            .ok_or_else(|| eyre!("--endpoint needs --authorization (or TRIPBOARD_AUTHORIZATION)"))?;
        let endpoint: url::Url = endpoint
            .parse()
            .wrap_err_with(|| format!("invalid endpoint URL: {endpoint}"))?;
        return Ok(Source::Service(ServiceConfig {
            endpoint,
            authorization: SecretString::from(authorization),
            timeout: Duration::from_secs(cfg.defaults.timeout),
        }));
    }

    match cfg.profile(cli.profile.as_deref()) {
        Ok((name, profile)) => {
            info!(profile = name, "using config profile");
            let service =
                tripboard_config::profile_to_service_config(profile, name, &cfg.defaults)?;
            Ok(Source::Service(service))
        }
        Err(ConfigError::UnknownProfile { profile }) if cli.profile.is_none() => {
            info!(%profile, "no profile configured, using demo data");
            Ok(Source::Demo)
        }
        Err(e) => Err(e.into()),
    }
}

fn build_api(cli: &Cli, cfg: &Config, source: Source) -> Result<(Arc<dyn PointsApi>, String)> {
    match source {
        Source::Service(service) => {
            let label = service.endpoint.to_string();
            let client = service.build_client()?;
            Ok((Arc::new(client), label))
        }
        Source::Demo => {
            let demo = DemoSource::generate(cfg.defaults.demo_points, Utc::now())
                .with_latency(Duration::from_millis(cli.demo_latency_ms))
                .with_failure_rate(cli.demo_failure_rate.clamp(0.0, 1.0));
            Ok((Arc::new(demo), "demo".to_owned()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hooks first, so a failure below still leaves a usable terminal.
    tui::install_hooks()?;

    let _log_guard = setup_tracing(&cli);

    let cfg = match tripboard_config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config not loaded, using defaults");
            Config::default()
        }
    };

    let source = resolve_source(&cli, &cfg)?;
    let (api, label) = build_api(&cli, &cfg, source)?;
    info!(source = %label, "starting tripboard");

    let mut app = App::new(api, label);
    app.run().await?;

    Ok(())
}
