pub mod handlers;
pub mod types;

use crate::service::CircleService;
use axum::{routing::post, Router};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct RpcState {
    pub service: Arc<Mutex<CircleService>>,
    /// Signals the serve loop to save and exit.
    pub shutdown_tx: mpsc::Sender<()>,
}

pub struct RpcServer {
    state: RpcState,
    bind_addr: String,
}

impl RpcServer {
    pub fn new(
        service: Arc<Mutex<CircleService>>,
        shutdown_tx: mpsc::Sender<()>,
        port: u16,
    ) -> Self {
        Self {
            state: RpcState {
                service,
                shutdown_tx,
            },
            bind_addr: format!("0.0.0.0:{}", port),
        }
    }

    pub async fn start(self) {
        let app = Router::new()
            .route("/", post(handlers::handle_rpc_request))
            .layer(CorsLayer::permissive())
            .with_state(self.state);

        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .expect("Failed to bind RPC server");

        println!("RPC server listening on {}", self.bind_addr);
        axum::serve(listener, app).await.expect("RPC server failed");
    }
}
