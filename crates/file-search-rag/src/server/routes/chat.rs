//! Chat endpoints, one per domain plus one across all stores

use axum::{extract::State, Json};

use crate::server::state::AppState;
use crate::types::{ChatRequest, ChatResponse, Domain};

async fn chat_domain(state: &AppState, domain: Domain, request: &ChatRequest) -> ChatResponse {
    tracing::info!("Chat [{}]: {} bytes", domain, request.message.len());
    tracing::debug!("Chat [{}] message: {:?}", domain, request.message);
    let stores = state.registry().for_domain(domain);
    state.dispatcher().chat(&request.message, &stores).await
}

/// POST /chat/business
pub async fn chat_business(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(chat_domain(&state, Domain::Business, &request).await)
}

/// POST /chat/science
pub async fn chat_science(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(chat_domain(&state, Domain::Science, &request).await)
}

/// POST /chat/story
pub async fn chat_story(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(chat_domain(&state, Domain::Story, &request).await)
}

/// POST /chat/all - search every store for one answer
pub async fn chat_all(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    tracing::info!("Chat [all]: {} bytes", request.message.len());
    tracing::debug!("Chat [all] message: {:?}", request.message);
    let stores = state.registry().all();
    Json(state.dispatcher().chat(&request.message, &stores).await)
}
