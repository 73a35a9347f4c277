pub mod account;
pub mod friend;
pub mod node;
pub mod note;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "circle")]
#[command(about = "Circle social graph CLI", long_about = None)]
pub struct Cli {
    /// RPC endpoint used by client subcommands
    #[arg(long, global = true, default_value = "http://127.0.0.1:7000")]
    pub rpc_url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the node: serve RPC, load and save the snapshot
    Serve {
        #[arg(long, default_value = "circle.toml")]
        config: String,
        #[arg(long)]
        rpc_port: Option<u16>,
    },
    /// Account management
    Account {
        #[command(subcommand)]
        cmd: account::AccountCommands,
    },
    /// Friendship operations
    Friend {
        #[command(subcommand)]
        cmd: friend::FriendCommands,
    },
    /// Mailbox notes
    Note {
        #[command(subcommand)]
        cmd: note::NoteCommands,
    },
    /// Node operations
    Node {
        #[command(subcommand)]
        cmd: node::NodeCommands,
    },
}
