// RPC types for JSON-RPC 2.0 protocol
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: u64,
}

#[derive(Serialize, Debug)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: u64,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

// Method-specific parameter types
#[derive(Deserialize, Debug)]
pub struct CreateAccountParams {
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct GetAttributeParams {
    pub login: String,
    pub attribute: String,
}

#[derive(Deserialize, Debug)]
pub struct OpenSessionParams {
    pub login: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct EditProfileParams {
    pub token: String,
    pub attribute: String,
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct AddFriendParams {
    pub token: String,
    pub friend: String,
}

#[derive(Deserialize, Debug)]
pub struct IsFriendParams {
    pub login: String,
    pub friend: String,
}

#[derive(Deserialize, Debug)]
pub struct GetFriendsParams {
    pub login: String,
}

#[derive(Deserialize, Debug)]
pub struct SendNoteParams {
    pub token: String,
    pub to: String,
    pub body: String,
}

#[derive(Deserialize, Debug)]
pub struct ReadNoteParams {
    pub token: String,
}

#[derive(Serialize, Debug)]
pub struct NodeInfo {
    pub accounts: usize,
    pub sessions: usize,
    pub version: String,
}
