//! Routes for the chat server

pub mod chat;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use crate::server::state::AppState;

/// Chat routes
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/business", post(chat::chat_business))
        .route("/science", post(chat::chat_science))
        .route("/story", post(chat::chat_story))
        .route("/all", post(chat::chat_all))
}

/// Informational API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "file-search-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Chat over Gemini file search stores",
        "endpoints": {
            "POST /chat/business": "Ask the business store",
            "POST /chat/science": "Ask the science store",
            "POST /chat/story": "Ask the story store",
            "POST /chat/all": "Ask across all stores",
            "GET /health": "Liveness check"
        },
        "stores": state.registry(),
    }))
}
