use clap::Subcommand;

use crate::client::RpcClient;

#[derive(Subcommand)]
pub enum FriendCommands {
    /// Send a friend request (or accept a pending one)
    Add { token: String, friend: String },
    /// List an account's friends
    List { login: String },
    /// Check whether `friend` is on `login`'s friend list
    Check { login: String, friend: String },
}

/// Friend lists print as `{a,b,c}`, `{}` when empty.
pub fn format_friends(friends: &[String]) -> String {
    format!("{{{}}}", friends.join(","))
}

pub async fn handle_friend_command(cmd: FriendCommands, rpc_url: String) {
    let client = RpcClient::new(rpc_url);
    match cmd {
        FriendCommands::Add { token, friend } => match client.add_friend(&token, &friend).await {
            Ok(()) => println!("Friend request sent to '{}'.", friend),
            Err(e) => println!("Error: {}", e),
        },
        FriendCommands::List { login } => match client.get_friends(&login).await {
            Ok(friends) => println!("{}", format_friends(&friends)),
            Err(e) => println!("Error: {}", e),
        },
        FriendCommands::Check { login, friend } => match client.is_friend(&login, &friend).await {
            Ok(answer) => println!("{}", answer),
            Err(e) => println!("Error: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_friends() {
        assert_eq!(format_friends(&[]), "{}");
        assert_eq!(format_friends(&["bob".to_string()]), "{bob}");
        assert_eq!(
            format_friends(&["bob".to_string(), "carol".to_string()]),
            "{bob,carol}"
        );
    }
}
