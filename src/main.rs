use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use answer_relay::connector::http_api::API_TOKEN_ENV;
use answer_relay::connector::DEFAULT_TIMEOUT_SECS;
use answer_relay::{
    Commands, Container, ContainerConfig, HttpAnswerProvider, RelayHttpServer, Router,
};

#[derive(Parser)]
#[command(name = "answer-relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.answer-relay")]
    data_dir: String,

    /// Base address of the answer-provider service (falls back to RELAY_PROVIDER_ADDRESS)
    #[arg(long, global = true)]
    provider_address: Option<String>,

    /// Timeout for each call to the answer-provider service
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Answer with an offline echo provider instead of calling the service
    #[arg(long, global = true)]
    mock_provider: bool,

    #[arg(long, global = true)]
    memory_storage: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ContainerConfig {
        data_dir: expand_tilde(&cli.data_dir),
        provider_address: cli
            .provider_address
            .unwrap_or_else(HttpAnswerProvider::configured_address),
        timeout_secs: cli.timeout_secs,
        mock_provider: cli.mock_provider,
        memory_storage: cli.memory_storage,
    };
    let container = Container::new(config).await?;

    match cli.command {
        Commands::Serve {
            port,
            public,
            api_token,
        } => {
            let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
            let addr = SocketAddr::from((host, port));
            let api_token = api_token.or_else(|| std::env::var(API_TOKEN_ENV).ok());

            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Starting relay server on {}", addr);
            RelayHttpServer::new(Arc::new(container))
                .with_api_token(api_token)
                .serve(listener)
                .await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{}/{}", home, rest);
        }
    }
    path.to_string()
}
