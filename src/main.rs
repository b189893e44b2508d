use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use masar::app::App;
use masar::channels::CliChannel;
use masar::config::AppConfig;
use masar::error::ConfigError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _guard = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(ConfigError::Io)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "masar.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    };

    tracing::info!(
        user = %config.user_name,
        advisor_delay_ms = config.advisor_delay.as_millis() as u64,
        "Starting MASAR"
    );

    eprintln!("MASAR prototype. Type /help for commands, /quit to exit.");

    let mut app = App::new(config, Arc::new(CliChannel::new()));
    app.run().await?;

    Ok(())
}
