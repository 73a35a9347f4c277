use clap::Subcommand;

use crate::client::RpcClient;

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Send a note to another account
    Send {
        token: String,
        to: String,
        body: String,
    },
    /// Read (and remove) the oldest note in the mailbox
    Read { token: String },
}

pub async fn handle_note_command(cmd: NoteCommands, rpc_url: String) {
    let client = RpcClient::new(rpc_url);
    match cmd {
        NoteCommands::Send { token, to, body } => {
            match client.send_note(&token, &to, &body).await {
                Ok(()) => println!("Note sent to '{}'.", to),
                Err(e) => println!("Error: {}", e),
            }
        }
        NoteCommands::Read { token } => match client.read_note(&token).await {
            Ok(body) => println!("{}", body),
            Err(e) => println!("Error: {}", e),
        },
    }
}
