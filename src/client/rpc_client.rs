// RPC client for making JSON-RPC requests
use reqwest::Client;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct RpcClient {
    url: String,
    client: Client,
    request_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
            request_id: AtomicU64::new(1),
        }
    }

    // Helper for sending requests
    async fn send_request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("RPC request failed: {}", e))?;

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        if let Some(error) = json.get("error") {
            return Err(error["message"].as_str().unwrap_or("Unknown error").to_string());
        }

        Ok(json["result"].clone())
    }

    pub async fn create_account(
        &self,
        login: &str,
        password: &str,
        name: &str,
    ) -> Result<(), String> {
        self.send_request(
            "createAccount",
            json!({ "login": login, "password": password, "name": name }),
        )
        .await?;
        Ok(())
    }

    pub async fn get_attribute(&self, login: &str, attribute: &str) -> Result<String, String> {
        let res = self
            .send_request(
                "getAttribute",
                json!({ "login": login, "attribute": attribute }),
            )
            .await?;
        Ok(res["value"].as_str().unwrap_or("").to_string())
    }

    pub async fn open_session(&self, login: &str, password: &str) -> Result<String, String> {
        let res = self
            .send_request("openSession", json!({ "login": login, "password": password }))
            .await?;
        Ok(res["token"].as_str().unwrap_or("").to_string())
    }

    pub async fn edit_profile(
        &self,
        token: &str,
        attribute: &str,
        value: &str,
    ) -> Result<(), String> {
        self.send_request(
            "editProfile",
            json!({ "token": token, "attribute": attribute, "value": value }),
        )
        .await?;
        Ok(())
    }

    pub async fn add_friend(&self, token: &str, friend: &str) -> Result<(), String> {
        self.send_request("addFriend", json!({ "token": token, "friend": friend }))
            .await?;
        Ok(())
    }

    pub async fn is_friend(&self, login: &str, friend: &str) -> Result<bool, String> {
        let res = self
            .send_request("isFriend", json!({ "login": login, "friend": friend }))
            .await?;
        Ok(res["is_friend"].as_bool().unwrap_or(false))
    }

    pub async fn get_friends(&self, login: &str) -> Result<Vec<String>, String> {
        let res = self
            .send_request("getFriends", json!({ "login": login }))
            .await?;
        let friends_val = res.get("friends").ok_or("No 'friends' field in response")?;
        let friends: Vec<String> = serde_json::from_value(friends_val.clone())
            .map_err(|e| format!("Failed to parse friends: {}", e))?;
        Ok(friends)
    }

    pub async fn send_note(&self, token: &str, to: &str, body: &str) -> Result<(), String> {
        self.send_request(
            "sendNote",
            json!({ "token": token, "to": to, "body": body }),
        )
        .await?;
        Ok(())
    }

    pub async fn read_note(&self, token: &str) -> Result<String, String> {
        let res = self
            .send_request("readNote", json!({ "token": token }))
            .await?;
        Ok(res["body"].as_str().unwrap_or("").to_string())
    }

    pub async fn reset_system(&self) -> Result<(), String> {
        self.send_request("resetSystem", json!(null)).await?;
        Ok(())
    }

    pub async fn save_system(&self) -> Result<(), String> {
        self.send_request("saveSystem", json!(null)).await?;
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), String> {
        self.send_request("shutdown", json!(null)).await?;
        Ok(())
    }

    pub async fn get_node_info(&self) -> Result<serde_json::Value, String> {
        self.send_request("getNodeInfo", json!(null)).await
    }

    pub async fn get_version(&self) -> Result<String, String> {
        let res = self.send_request("getVersion", json!(null)).await?;
        Ok(res["version"].as_str().unwrap_or("unknown").to_string())
    }
}
