use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use desktop_control::{Desktop, DesktopServer, Dispatcher, ServerConfig};

#[derive(Parser)]
#[command(name = "desktop-control", version, about = "MCP server for mouse, keyboard and window control")]
struct Cli {
    /// Log filter, e.g. "info" or "desktop_control=debug"
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Also append logs to this file
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Append error-level events to this file
    #[arg(long, env = "ERROR_LOG_FILE")]
    error_log_file: Option<PathBuf>,
}

// stdout carries the protocol, so logs only ever go to stderr or the log file.
fn init_tracing(config: &ServerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let file = config
        .open_log_file()
        .context("opening log file")?
        .map(|f| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(f))
        });
    let errors = config
        .open_error_log_file()
        .context("opening error log file")?
        .map(|f| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(f))
                .with_filter(LevelFilter::ERROR)
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .with(errors)
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::default()
        .with_log_level(cli.log_level)
        .with_log_file(cli.log_file)
        .with_error_log_file(cli.error_log_file);
    init_tracing(&config)?;

    let dispatcher = Dispatcher::new(Desktop::native());
    info!(tools = dispatcher.catalog().len(), "desktop-control running on stdio");

    let service = DesktopServer::new(dispatcher, config)
        .serve(rmcp::transport::stdio())
        .await
        .context("starting MCP service")?;
    service.waiting().await?;
    Ok(())
}
