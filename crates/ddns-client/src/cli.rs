// Command-line surface of the client
//
// Every flag can also be set through a `DDNS_*` environment variable so the
// client runs unchanged from cron, a systemd timer or a container.

use clap::{Parser, ValueEnum};
use ddns_core::state::DEFAULT_CACHE_FILE;
use std::path::{Path, PathBuf};
use std::time::Duration;

macro_rules! env_prefix {
    () => {
        "DDNS_"
    };
}

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "app.log";

/// Log file value that selects stderr
pub const STDERR_LOG: &str = "-";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Send an email notification when the public IP changes
    #[arg(
        value_enum,
        short = 'e',
        long,
        default_value_t = EmailFlag::No,
        env = concat!(env_prefix!(), "EMAIL")
    )]
    pub email: EmailFlag,

    /// Resolve the FreeDNS record but do not update it or touch the cache
    #[arg(long, action, default_value_t = false, env = concat!(env_prefix!(), "DRY_RUN"))]
    pub dry_run: bool,

    /// Set the loglevel of the application
    #[arg(
        value_enum,
        long,
        default_value_t = LogLevel::Info,
        value_name = "LEVEL",
        env = concat!(env_prefix!(), "LOG_LEVEL")
    )]
    pub log_level: LogLevel,

    /// File the log is appended to; `-` logs to stderr
    #[arg(
        long,
        default_value = DEFAULT_LOG_FILE,
        value_name = "PATH",
        env = concat!(env_prefix!(), "LOG_FILE")
    )]
    pub log_file: PathBuf,

    /// File holding the last known public IP
    #[arg(
        long,
        default_value = DEFAULT_CACHE_FILE,
        value_name = "PATH",
        env = concat!(env_prefix!(), "CACHE_FILE")
    )]
    pub cache_file: PathBuf,

    /// Service that answers with the caller's public IP as plain text
    #[arg(
        long,
        default_value = ddns_ip_http::DEFAULT_LOOKUP_URL,
        value_name = "URL",
        env = concat!(env_prefix!(), "IP_LOOKUP_URL")
    )]
    pub ip_lookup_url: String,

    /// FreeDNS API endpoint used to list the account's records
    #[arg(
        long,
        default_value = ddns_provider_freedns::FREEDNS_API_BASE,
        value_name = "URL",
        env = concat!(env_prefix!(), "FREEDNS_API_URL")
    )]
    pub freedns_api_url: String,

    /// Timeout for every HTTP request and SMTP session, in seconds
    #[arg(
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..=300),
        value_name = "SECS",
        env = concat!(env_prefix!(), "HTTP_TIMEOUT_SECS")
    )]
    pub http_timeout_secs: u64,
}

impl Cli {
    pub fn email_enabled(&self) -> bool {
        self.email == EmailFlag::Yes
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Whether logs go to stderr instead of a file
    pub fn logs_to_stderr(&self) -> bool {
        self.log_file == Path::new(STDERR_LOG)
    }

    /// Where the user should look for details after a failure
    pub fn log_location(&self) -> String {
        if self.logs_to_stderr() {
            "stderr".to_string()
        } else {
            self.log_file.display().to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmailFlag {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
