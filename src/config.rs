use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;

use crate::{
    application::usecases::{
        check_webhooks::{CheckerConfig, DEFAULT_CHECK_CONCURRENCY},
        notify_webhook::NotifierConfig,
    },
    domain::{
        errors::DomainError,
        models::{MessageContent, PROBE_MESSAGE},
        value_objects::{Endpoint, Interval},
    },
    infrastructure::messaging::discord::{DEFAULT_TIMEOUT_SECS, HttpClientConfig, default_user_agent},
};

#[derive(Debug, Parser)]
#[command(name = "hookpulse", version, about = "Send and probe chat webhooks")]
pub struct Cli {
    /// Timeout for every outbound request, in seconds
    #[arg(
        long,
        env = "WEBHOOK_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    pub http_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "WEBHOOK_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Bypass proxies configured in the environment
    #[arg(long, env = "WEBHOOK_NO_PROXY", global = true)]
    pub no_proxy: bool,

    /// Print one JSON object per line instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a message to one webhook on a fixed interval until interrupted
    Notify(NotifyArgs),
    /// Send a test message to each webhook once and report which are live
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct NotifyArgs {
    /// Webhook URL
    #[arg(long, env = "WEBHOOK_URL")]
    pub endpoint: Option<String>,

    /// Message text, sent verbatim
    #[arg(long, env = "WEBHOOK_MESSAGE")]
    pub message: Option<String>,

    /// Delay between two sends, in seconds
    #[arg(long, env = "WEBHOOK_INTERVAL_SECS")]
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Webhook URLs to probe
    #[arg(env = "WEBHOOK_URLS", value_delimiter = ',')]
    pub endpoints: Vec<String>,

    /// File with one webhook URL per line; blank lines and `#` comments are ignored
    #[arg(long, env = "WEBHOOK_ENDPOINTS_FILE")]
    pub endpoints_file: Option<PathBuf>,

    /// Message used to probe each webhook
    #[arg(long, env = "WEBHOOK_PROBE_MESSAGE", default_value = PROBE_MESSAGE)]
    pub probe_message: String,

    /// Maximum number of webhooks probed at the same time
    #[arg(
        long,
        env = "WEBHOOK_CHECK_CONCURRENCY",
        default_value_t = DEFAULT_CHECK_CONCURRENCY.get()
    )]
    pub concurrency: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("HTTP timeout must be greater than zero")]
    ZeroTimeout,
    #[error("failed to read endpoints file {}: {source}", .path.display())]
    EndpointsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no webhook endpoints supplied")]
    NoEndpoints,
    #[error("check concurrency must be greater than zero")]
    ZeroConcurrency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug)]
pub enum CommandConfig {
    Notify(NotifierConfig),
    Check {
        endpoints: Vec<String>,
        checker: CheckerConfig,
    },
}

#[derive(Debug)]
pub struct Config {
    pub http: HttpClientConfig,
    pub output: OutputFormat,
    pub command: CommandConfig,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();

        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Config, ConfigError> {
        if cli.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let http = HttpClientConfig {
            timeout: Duration::from_secs(cli.http_timeout_secs),
            user_agent: cli.user_agent.unwrap_or_else(default_user_agent),
            no_proxy: cli.no_proxy,
        };
        let output = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let command = match cli.command {
            Command::Notify(args) => CommandConfig::Notify(notifier_config(args)?),
            Command::Check(args) => {
                let checker = CheckerConfig {
                    probe: MessageContent::new(args.probe_message)?,
                    concurrency: NonZeroUsize::new(args.concurrency)
                        .ok_or(ConfigError::ZeroConcurrency)?,
                };
                // `WEBHOOK_URLS=a, b` leaves a space in front of `b`.
                let mut endpoints: Vec<String> = args
                    .endpoints
                    .iter()
                    .map(|endpoint| endpoint.trim().to_string())
                    .collect();
                if let Some(path) = &args.endpoints_file {
                    endpoints.extend(read_endpoints_file(path)?);
                }
                if endpoints.is_empty() {
                    return Err(ConfigError::NoEndpoints);
                }
                CommandConfig::Check { endpoints, checker }
            }
        };

        Ok(Config {
            http,
            output,
            command,
        })
    }
}

fn notifier_config(args: NotifyArgs) -> Result<NotifierConfig, ConfigError> {
    let endpoint = args
        .endpoint
        .ok_or(ConfigError::Missing("webhook endpoint (--endpoint or WEBHOOK_URL)"))?;
    let message = args
        .message
        .ok_or(ConfigError::Missing("message (--message or WEBHOOK_MESSAGE)"))?;
    let interval_secs = args.interval_secs.ok_or(ConfigError::Missing(
        "resend interval (--interval-secs or WEBHOOK_INTERVAL_SECS)",
    ))?;

    Ok(NotifierConfig {
        endpoint: Endpoint::try_from_config(endpoint.trim())?,
        message: MessageContent::new(message)?,
        interval: Interval::from_secs(interval_secs)?,
    })
}

fn read_endpoints_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::EndpointsFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
