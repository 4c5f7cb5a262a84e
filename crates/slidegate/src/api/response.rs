//! Success bodies for the `/api/` endpoints

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Successful gateway output
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayResponse {
    /// Raw model text, `text/plain`
    Text(String),
    /// JSON document, `application/json`
    Json(Value),
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let no_store = [(header::CACHE_CONTROL, "no-store")];
        match self {
            GatewayResponse::Text(text) => (
                StatusCode::OK,
                no_store,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                text,
            )
                .into_response(),
            GatewayResponse::Json(value) => (StatusCode::OK, no_store, Json(value)).into_response(),
        }
    }
}
