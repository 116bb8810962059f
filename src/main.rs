use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio::main;
use tokio_util::sync::CancellationToken;

use hookpulse::{
    application::{
        handlers::delivery_reporter::DeliveryReporter,
        usecases::{check_webhooks::CheckWebhooksUseCase, notify_webhook::NotifyWebhookUseCase},
    },
    config::{CommandConfig, Config, ConfigError},
    infrastructure::{messaging::discord::DiscordWebhookClient, telemetry::init_tracing},
    presentation::{console::ConsoleReporter, shutdown::cancel_on_signal},
};

const TRACING_TARGET: &str = "hookpulse::main";

/// Exit status for configuration errors, reported before any request is sent.
const EXIT_CONFIG_ERROR: u8 = 2;

#[main]
async fn main() -> ExitCode {
    if let Err(err) = init_tracing() {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(target: TRACING_TARGET, error = %err, "invalid configuration");
            eprintln!("configuration error: {err}");
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(target: TRACING_TARGET, error = %err, "terminated with error");
            eprintln!("Error: {err:#}");
            if err.downcast_ref::<ConfigError>().is_some() {
                ExitCode::from(EXIT_CONFIG_ERROR)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let client =
        DiscordWebhookClient::new(&config.http).context("failed to create webhook client")?;
    let reporter: Arc<dyn DeliveryReporter> = Arc::new(ConsoleReporter::new(config.output));

    match config.command {
        CommandConfig::Notify(notifier) => {
            let shutdown = CancellationToken::new();
            tokio::spawn(cancel_on_signal(shutdown.clone()));

            NotifyWebhookUseCase::new(client, reporter, notifier)
                .run(shutdown)
                .await;
            Ok(())
        }
        CommandConfig::Check { endpoints, checker } => {
            CheckWebhooksUseCase::new(client, reporter, checker)
                .run(&endpoints)
                .await
                .map_err(ConfigError::from)?;
            Ok(())
        }
    }
}
