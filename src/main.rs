mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod routes;
mod services;
mod workflow;

#[cfg(test)]
mod test_support;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::memory_token::InMemoryTokenStore;
use crate::infra::slack::SlackWebhook;
use crate::infra::zendesk::ZendeskClient;
use crate::services::NotificationService;

#[derive(Parser)]
#[command(
    name = "desk-relay",
    author,
    version,
    about = "Zendesk OAuth proxy with chat alerts for urgent tickets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP bridge.
    Serve(ServeArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    /// Port to listen on.
    #[arg(short, long, default_value_t = 3004)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(err) = run().await {
        error!(error = %err, "desk-relay exited with an error");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("desk_relay=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Serve(args) => run_serve(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> AppResult<()> {
    let config = Arc::new(AppConfig::load()?);
    info!(
        subdomain = %config.subdomain,
        base_url = %config.api_base_url,
        "configuration loaded"
    );

    let notifier: Option<Arc<dyn NotificationService>> = match &config.webhook_url {
        Some(url) => Some(Arc::new(SlackWebhook::new(url.clone(), config.http_timeout)?)),
        None => {
            warn!("SLACK_WEBHOOK_URL not set; urgent ticket alerts are disabled");
            None
        }
    };
    let helpdesk = Arc::new(ZendeskClient::new(config.clone())?);
    let token_store = Arc::new(InMemoryTokenStore::new());

    let context = AppContext::new(config, token_store, helpdesk, notifier);
    routes::serve(context, SocketAddr::new(args.host, args.port)).await
}
