//! Travel MCP server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mcp_server::http::{self, AppState};
use mcp_server::{build_dispatcher, load_env_files, stdio, Config, ServerError};
use travel_providers::http_providers;

#[derive(Debug, Parser)]
#[command(name = "travel-mcp")]
#[command(about = "Serve travel planning tools over the Model Context Protocol")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve over HTTP (default)
    Http {
        /// Bind address, overrides MCP_HTTP_HOST and MCP_HTTP_PORT
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
    /// Serve line-delimited JSON-RPC on stdin/stdout
    Stdio,
    /// Print the tools that would be registered and exit
    Tools,
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    load_env_files();

    // stdout belongs to the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    let providers = http_providers(config.travel_api_config(), config.weather_config())?;

    match cli.command.unwrap_or(Command::Http { addr: None }) {
        Command::Http { addr } => {
            if let Some(addr) = addr {
                config.addr = addr;
            }
            let dispatcher = build_dispatcher(&config, &providers)?;
            if config.auth_token.is_none() {
                info!("No AUTH_TOKEN set, /mcp accepts unauthenticated requests");
            }
            let state = AppState::from_config(Arc::new(dispatcher), &config);
            http::serve(config.addr, state).await
        }
        Command::Stdio => {
            let dispatcher = build_dispatcher(&config, &providers)?;
            let reader = tokio::io::BufReader::new(tokio::io::stdin());
            stdio::run(Arc::new(dispatcher), reader, tokio::io::stdout()).await?;
            info!("stdin closed, exiting");
            Ok(())
        }
        Command::Tools => {
            let dispatcher = build_dispatcher(&config, &providers)?;
            for spec in dispatcher.adapter().registry().list() {
                println!("{:<28} {}", spec.name, spec.description);
            }
            Ok(())
        }
    }
}
