use clap::Subcommand;

use crate::client::RpcClient;

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Show node status (account and session counts)
    Info,
    /// Wipe all accounts, sessions and the snapshot
    Reset,
    /// Persist the directory to the snapshot now
    Save,
    /// Ask the node to save and exit
    Shutdown,
}

pub async fn handle_node_command(cmd: NodeCommands, rpc_url: String) {
    let client = RpcClient::new(rpc_url);
    match cmd {
        NodeCommands::Info => match client.get_node_info().await {
            Ok(info) => {
                println!("Node version: {}", info["version"].as_str().unwrap_or("unknown"));
                println!("Accounts:     {}", info["accounts"].as_u64().unwrap_or(0));
                println!("Sessions:     {}", info["sessions"].as_u64().unwrap_or(0));
            }
            Err(e) => println!("Error: {}", e),
        },
        NodeCommands::Reset => match client.reset_system().await {
            Ok(()) => println!("System reset."),
            Err(e) => println!("Error: {}", e),
        },
        NodeCommands::Save => match client.save_system().await {
            Ok(()) => println!("Snapshot saved."),
            Err(e) => println!("Error: {}", e),
        },
        NodeCommands::Shutdown => match client.shutdown().await {
            Ok(()) => println!("Shutdown requested."),
            Err(e) => println!("Error: {}", e),
        },
    }
}
