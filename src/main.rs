use anyhow::Result;
use std::process::ExitCode;
use std::sync::Arc;

use release_console::auth::CredentialStore;
use release_console::config::{self, Command, LogFormat};
use release_console::shell::terminal::{self, TerminalRegion};
use release_console::shell::{oneshot, Shell};
use release_console::state::AppState;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load configuration first (for log level)
    let (config, command) = config::Config::load()?;
    config.validate()?;

    init_logging(&config.log_level, config.log_format);

    tracing::info!("Release Console starting...");
    tracing::debug!("API: {}", config.api_base_url);
    tracing::debug!("Endpoints: {:?}", config.endpoints);

    let credentials = Arc::new(CredentialStore::open(&config.credential_db_file)?);
    let state = AppState::new(&config, credentials)?;
    let shell = Shell::new(state);

    run_command(&shell, command).await
}

fn init_logging(log_level: &str, format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

/// Dispatch the selected subcommand
async fn run_command(shell: &Shell, command: Command) -> Result<ExitCode> {
    if command == Command::Shell {
        terminal::run(shell).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let mut region = TerminalRegion::plain();
    if oneshot::run(shell, command, &mut region).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
