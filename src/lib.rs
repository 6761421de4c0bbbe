use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod procedures;
pub mod rpc;

use rpc::{Registry, Server};

#[derive(Clone)]
pub struct AppState {
    pub server: Server,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            server: Server::new(registry),
        }
    }
}

/// Routes `POST rpc_path` to the JSON-RPC receiver and `GET /health` to a probe.
pub fn build_app(state: AppState, rpc_path: &str) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route(rpc_path, post(http::handlers::rpc_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
