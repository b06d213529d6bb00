// # ddns-client - FreeDNS Dynamic DNS Client
//
// This binary is a THIN integration layer. All reconciliation logic lives in
// ddns-core; this file only:
// 1. Loads `.env` and parses the command line
// 2. Sets up logging
// 3. Builds the IP source, provider, cache store and notifier
// 4. Runs one reconciliation pass and maps the result to an exit code
//
// Scheduling is left to cron or a systemd timer; every invocation is one run.
//
// ## Example
//
// ```bash
// export username=alice
// export passwd=secret
// export domain=home.example.com
//
// ddns-client --email no
// ```
//
// See `settings.rs` for the environment variables and `ddns-client --help`
// for the flags.

mod cli;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use cli::Cli;
use ddns_core::{Error, FileStateStore, ReconcileOutcome, Reconciler};
use ddns_ip_http::HttpIpSource;
use ddns_notify_email::EmailNotifier;
use ddns_provider_freedns::FreeDnsProvider;
use settings::Settings;
use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Printed when the cached IP is still current
const NO_CHANGE_MESSAGE: &str = "Public IP has not changed, no updates required";

/// Exit codes for the different run results
///
/// - 0: Success (updated or nothing to do)
/// - 1: Configuration error
/// - 2: Runtime error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClientExitCode {
    /// Run finished normally
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (network, provider, cache)
    RuntimeError = 2,
}

impl From<ClientExitCode> for ExitCode {
    fn from(code: ClientExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    if let Err(e) = settings::hydrate_env_file() {
        eprintln!("Configuration error: {:#}", e);
        return ClientExitCode::ConfigError.into();
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ClientExitCode::Success,
                _ => ClientExitCode::ConfigError,
            };
            let _ = e.print();
            return code.into();
        }
    };

    let dispatch = match build_dispatch(&cli) {
        Ok(dispatch) => dispatch,
        Err(e) => {
            eprintln!("Failed to set up logging: {:#}", e);
            return ClientExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            return ClientExitCode::RuntimeError.into();
        }
    };

    // The subscriber is scoped to this future instead of installed globally
    rt.block_on(run(cli).with_subscriber(dispatch)).into()
}

/// Build the log subscriber for this run
fn build_dispatch(cli: &Cli) -> Result<Dispatch> {
    let (writer, ansi) = if cli.logs_to_stderr() {
        (BoxMakeWriter::new(std::io::stderr), true)
    } else {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cli.log_file)
            .with_context(|| format!("cannot open log file {}", cli.log_file.display()))?;
        (BoxMakeWriter::new(Mutex::new(file)), false)
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();

    Ok(Dispatch::new(subscriber))
}

/// Run one pass and report the result to the user
async fn run(cli: Cli) -> ClientExitCode {
    info!("Starting ddns-client v{}", env!("CARGO_PKG_VERSION"));

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid settings: {:#}", e);
            report_failure(&cli);
            return ClientExitCode::ConfigError;
        }
    };

    match reconcile_once(&cli, &settings).await {
        Ok(outcome) => {
            if !outcome.is_changed() {
                println!("{}", NO_CHANGE_MESSAGE);
            }
            info!("Run finished");
            ClientExitCode::Success
        }
        Err(e) => {
            error!("Run failed: {}", e);
            report_failure(&cli);
            match e {
                Error::Config(_) => ClientExitCode::ConfigError,
                _ => ClientExitCode::RuntimeError,
            }
        }
    }
}

fn load_settings() -> Result<Settings> {
    let settings = Settings::from_env()?;
    settings.validate()?;
    Ok(settings)
}

fn report_failure(cli: &Cli) {
    eprintln!(
        "Unexpected error occurred. Check the log file `{}` for more details",
        cli.log_location()
    );
}

/// Wire the components and run the reconciler once
async fn reconcile_once(cli: &Cli, settings: &Settings) -> ddns_core::Result<ReconcileOutcome> {
    let timeout = cli.http_timeout();
    let config = settings.run_config(cli.email_enabled(), cli.dry_run);

    if config.dry_run {
        info!("Dry-run mode: the DNS record and the cache will not be modified");
    }

    let ip_source = HttpIpSource::new(cli.ip_lookup_url.clone(), timeout)?;
    let provider = FreeDnsProvider::new(cli.freedns_api_url.clone(), timeout, config.dry_run)?;
    let state_store = FileStateStore::new(&cli.cache_file);
    debug!("Using cache file {}", state_store.path().display());

    let mut reconciler = Reconciler::new(
        Box::new(ip_source),
        Box::new(provider),
        Box::new(state_store),
        config,
    )?;

    if cli.email_enabled() {
        match EmailNotifier::new(settings.smtp(timeout)) {
            Ok(notifier) => reconciler = reconciler.with_notifier(Box::new(notifier)),
            Err(e) => warn!("Email notification disabled: {}", e),
        }
    }

    reconciler.reconcile().await
}
