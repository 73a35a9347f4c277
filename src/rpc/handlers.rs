use super::types::*;
use crate::error::CircleError;
use crate::rpc::RpcState;
use crate::service::CircleService;
use axum::{extract::State, Json};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Main dispatcher: routes incoming JSON-RPC requests to the correct handler.
pub async fn handle_rpc_request(
    State(state): State<RpcState>,
    Json(req): Json<RpcRequest>,
) -> Json<RpcResponse> {
    debug!("RPC Request: method={}, id={}", req.method, req.id);

    // Dispatch based on method name
    let result = match req.method.as_str() {
        "createAccount" => handle_create_account(&state, req.params),
        "getAttribute" => handle_get_attribute(&state, req.params),
        "openSession" => handle_open_session(&state, req.params),
        "editProfile" => handle_edit_profile(&state, req.params),
        "addFriend" => handle_add_friend(&state, req.params),
        "isFriend" => handle_is_friend(&state, req.params),
        "getFriends" => handle_get_friends(&state, req.params),
        "sendNote" => handle_send_note(&state, req.params),
        "readNote" => handle_read_note(&state, req.params),
        "resetSystem" => handle_reset_system(&state),
        "saveSystem" => handle_save_system(&state),
        "shutdown" => handle_shutdown(&state).await,
        "getNodeInfo" => handle_get_node_info(&state),
        "getVersion" => handle_get_version(),
        _ => Err(RpcError {
            code: -32601,
            message: format!("Method not found: {}", req.method),
        }),
    };

    // Build response
    match result {
        Ok(val) => Json(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(val),
            error: None,
            id: req.id,
        }),
        Err(err) => Json(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(err),
            id: req.id,
        }),
    }
}

//
// === Helper Functions ===
//

/// Safely acquire the service lock, recovering from poison
fn safe_lock(
    mutex: &Arc<Mutex<CircleService>>,
) -> Result<std::sync::MutexGuard<'_, CircleService>, RpcError> {
    mutex.lock().map_err(|e| {
        tracing::error!("Mutex poisoned: {}", e);
        RpcError {
            code: -32603,
            message: "Internal error: mutex poisoned".to_string(),
        }
    })
}

fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, RpcError> {
    serde_json::from_value(params).map_err(|e| RpcError {
        code: -32602,
        message: format!("Invalid params: {}", e),
    })
}

/// Engine failures keep their fixed per-kind message on the wire.
fn engine_error(err: CircleError) -> RpcError {
    RpcError {
        code: -32000,
        message: err.to_string(),
    }
}

//
// === Method Handlers ===
//

fn handle_create_account(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: CreateAccountParams = parse_params(params)?;
    let mut service = safe_lock(&state.service)?;
    service
        .create_account(&p.login, &p.password, &p.name)
        .map_err(engine_error)?;
    Ok(json!({ "ok": true }))
}

fn handle_get_attribute(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: GetAttributeParams = parse_params(params)?;
    let service = safe_lock(&state.service)?;
    let value = service
        .get_attribute(&p.login, &p.attribute)
        .map_err(engine_error)?;
    Ok(json!({ "value": value }))
}

fn handle_open_session(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: OpenSessionParams = parse_params(params)?;
    let mut service = safe_lock(&state.service)?;
    let token = service
        .open_session(&p.login, &p.password)
        .map_err(engine_error)?;
    Ok(json!({ "token": token }))
}

fn handle_edit_profile(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: EditProfileParams = parse_params(params)?;
    let mut service = safe_lock(&state.service)?;
    service
        .edit_profile(&p.token, &p.attribute, &p.value)
        .map_err(engine_error)?;
    Ok(json!({ "ok": true }))
}

fn handle_add_friend(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: AddFriendParams = parse_params(params)?;
    let mut service = safe_lock(&state.service)?;
    service
        .add_friend(&p.token, &p.friend)
        .map_err(engine_error)?;
    Ok(json!({ "ok": true }))
}

fn handle_is_friend(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: IsFriendParams = parse_params(params)?;
    let service = safe_lock(&state.service)?;
    let is_friend = service
        .is_friend(&p.login, &p.friend)
        .map_err(engine_error)?;
    Ok(json!({ "is_friend": is_friend }))
}

fn handle_get_friends(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: GetFriendsParams = parse_params(params)?;
    let service = safe_lock(&state.service)?;
    let friends = service.get_friends(&p.login).map_err(engine_error)?;
    Ok(json!({ "friends": friends }))
}

fn handle_send_note(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: SendNoteParams = parse_params(params)?;
    let mut service = safe_lock(&state.service)?;
    service
        .send_note(&p.token, &p.to, &p.body)
        .map_err(engine_error)?;
    Ok(json!({ "ok": true }))
}

fn handle_read_note(
    state: &RpcState,
    params: serde_json::Value,
) -> Result<serde_json::Value, RpcError> {
    let p: ReadNoteParams = parse_params(params)?;
    let mut service = safe_lock(&state.service)?;
    let body = service.read_note(&p.token).map_err(engine_error)?;
    Ok(json!({ "body": body }))
}

fn handle_reset_system(state: &RpcState) -> Result<serde_json::Value, RpcError> {
    let mut service = safe_lock(&state.service)?;
    service.reset().map_err(engine_error)?;
    Ok(json!({ "ok": true }))
}

fn handle_save_system(state: &RpcState) -> Result<serde_json::Value, RpcError> {
    let service = safe_lock(&state.service)?;
    service.save().map_err(engine_error)?;
    Ok(json!({ "ok": true }))
}

async fn handle_shutdown(state: &RpcState) -> Result<serde_json::Value, RpcError> {
    info!("shutdown requested over RPC");
    state.shutdown_tx.send(()).await.map_err(|_| RpcError {
        code: -32603,
        message: "Shutdown channel closed".to_string(),
    })?;
    Ok(json!({ "ok": true }))
}

fn handle_get_node_info(state: &RpcState) -> Result<serde_json::Value, RpcError> {
    let service = safe_lock(&state.service)?;
    let info = NodeInfo {
        accounts: service.account_count(),
        sessions: service.session_count(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    serde_json::to_value(&info).map_err(|e| RpcError {
        code: -32603,
        message: format!("Serialization error: {}", e),
    })
}

fn handle_get_version() -> Result<serde_json::Value, RpcError> {
    Ok(json!({ "version": env!("CARGO_PKG_VERSION") }))
}
