//! deskpilot - computer-control tool
//!
//! Main entry point for the deskpilot CLI.

mod cli;
mod cmd_invoke;
mod serve;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use deskpilot_config::{Config, ConfigLoader, ConfigValidator, LoggingSection};
use deskpilot_core::Kernel;
use deskpilot_tools_computer::ComputerToolsExtension;

use cli::{Cli, Commands};

/// Get the deskpilot home directory (~/.deskpilot).
fn deskpilot_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".deskpilot"))
        .unwrap_or_else(|| PathBuf::from(".deskpilot"))
}

/// Initialize tracing with console and optional file output.
///
/// The console layer writes to stderr; stdout carries JSON responses. Log
/// files go to ~/.deskpilot/logs/ with daily rotation.
fn init_tracing(logging: &LoggingSection) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = if logging.file {
        let log_dir = deskpilot_dir().join("logs");
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("deskpilot")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Dropping the guard stops the writer thread.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Load the config file (defaults when missing) and apply environment overrides.
fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    Ok(ConfigLoader::apply_overrides(config, |key| std::env::var(key).ok())?)
}

fn check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;
    for warning in &result.warnings {
        warn!("Config warning: {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        return Err(format!("Invalid configuration: {}", errors.join("; ")).into());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(&config.logging)?;
    check_config(&config)?;

    info!("Starting deskpilot v{}", env!("CARGO_PKG_VERSION"));

    let kernel = Kernel::new(std::env::current_dir()?);
    kernel
        .load_extension(
            Box::new(ComputerToolsExtension::new()),
            serde_json::to_value(&config)?,
        )
        .await?;

    let result = match cli.command {
        Commands::Invoke {
            action,
            text,
            coordinate,
            save_image,
        } => cmd_invoke::handle_invoke(&kernel, action, text, coordinate, save_image).await,
        Commands::Serve => serve::run_serve(&kernel).await,
        Commands::Options => cmd_invoke::handle_options(&kernel),
        Commands::Tools => cmd_invoke::handle_tools(&kernel),
    };

    kernel.shutdown().await;
    result
}
