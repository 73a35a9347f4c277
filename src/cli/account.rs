use clap::Subcommand;

use crate::client::RpcClient;

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Register a new account
    Create {
        login: String,
        password: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Read a profile field
    Get { login: String, attribute: String },
    /// Open a session and print the token
    Login { login: String, password: String },
    /// Edit a profile field using a session token
    Edit {
        token: String,
        attribute: String,
        value: String,
    },
}

pub async fn handle_account_command(cmd: AccountCommands, rpc_url: String) {
    let client = RpcClient::new(rpc_url);
    match cmd {
        AccountCommands::Create {
            login,
            password,
            name,
        } => match client.create_account(&login, &password, &name).await {
            Ok(()) => println!("Account '{}' created.", login),
            Err(e) => println!("Error: {}", e),
        },
        AccountCommands::Get { login, attribute } => {
            match client.get_attribute(&login, &attribute).await {
                Ok(value) => println!("{}", value),
                Err(e) => println!("Error: {}", e),
            }
        }
        AccountCommands::Login { login, password } => {
            match client.open_session(&login, &password).await {
                Ok(token) => println!("{}", token),
                Err(e) => println!("Error: {}", e),
            }
        }
        AccountCommands::Edit {
            token,
            attribute,
            value,
        } => match client.edit_profile(&token, &attribute, &value).await {
            Ok(()) => println!("Profile updated."),
            Err(e) => println!("Error: {}", e),
        },
    }
}
