use clap::Parser;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{error, info};

use rust_circle::cli::{self, Cli, Commands};
use rust_circle::config::CircleConfig;
use rust_circle::rpc::RpcServer;
use rust_circle::service::CircleService;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { config, rpc_port }) => run_node(&config, rpc_port).await,
        Some(Commands::Account { cmd }) => {
            cli::account::handle_account_command(cmd, cli.rpc_url).await;
        }
        Some(Commands::Friend { cmd }) => {
            cli::friend::handle_friend_command(cmd, cli.rpc_url).await;
        }
        Some(Commands::Note { cmd }) => {
            cli::note::handle_note_command(cmd, cli.rpc_url).await;
        }
        Some(Commands::Node { cmd }) => {
            cli::node::handle_node_command(cmd, cli.rpc_url).await;
        }
        // No subcommand: run the node with defaults.
        None => run_node("circle.toml", None).await,
    }
}

async fn run_node(config_path: &str, rpc_port: Option<u16>) {
    let config = CircleConfig::load_or_default(config_path);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.node.log_level)),
        )
        .init();

    let service = match CircleService::open(config.node.snapshot_path.as_str()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load snapshot: {}", e);
            return;
        }
    };
    let service = Arc::new(Mutex::new(service));

    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
    let port = rpc_port.unwrap_or(config.node.rpc_port);
    let server = RpcServer::new(service.clone(), shutdown_tx, port);
    let server_task = tokio::spawn(server.start());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("ctrl-c received, shutting down"),
        _ = shutdown_rx.recv() => info!("shutdown requested, stopping"),
    }
    server_task.abort();

    // Save-at-stop: the snapshot is the only durable state.
    match service.lock() {
        Ok(service) => {
            if let Err(e) = service.save() {
                error!("Failed to save snapshot: {}", e);
            }
        }
        Err(e) => error!("Service lock poisoned at shutdown: {}", e),
    };
}
