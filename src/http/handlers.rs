//! Axum HTTP handlers for the web server

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::rpc::{ErrorKind, Reply, Response as RpcResponse};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn rpc_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let Ok(payload) = std::str::from_utf8(&body) else {
        debug!(bytes = body.len(), "request body is not utf-8");
        return (
            StatusCode::OK,
            Json(Reply::Single(RpcResponse::top_level(ErrorKind::ParseError))),
        )
            .into_response();
    };

    match state.server.handle(payload) {
        Some(reply) => (StatusCode::OK, Json(reply)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
