//! Chatbot lifecycle handlers
//!
//! Thin layer over the lifecycle service: extract the path and body, call the
//! service, wrap the result. Transition rules live in the service.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use crate::{
    error::Result,
    models::chatbot::{
        ChangeStateRequest, ChatbotActiveResponse, ChatbotResponse, ChatbotState, ChatbotStatus,
    },
    services::chatbot_lifecycle,
    state::AppState,
};

// ============================================================================
// QUERIES
// ============================================================================

/// GET /api/v1/chatbots/{id}/state
///
/// # HTTP Status Codes
/// - `200 OK`: `{status, is_active}`
/// - `404 NOT_FOUND`: Chatbot not found
pub async fn get_state(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
) -> Result<Json<ChatbotState>> {
    tracing::debug!(
        operation = "get_state",
        chatbot_id = %chatbot_id,
        "Getting chatbot state",
    );

    let chatbot_state = chatbot_lifecycle::get_chatbot_state(state.chatbots.as_ref(), chatbot_id)
        .await
        .inspect_err(|e| log_handler_error("get_state", e))?;

    Ok(Json(chatbot_state))
}

/// GET /api/v1/chatbots/{id}/active
///
/// # HTTP Status Codes
/// - `200 OK`: `{active}`
/// - `404 NOT_FOUND`: Chatbot not found
pub async fn get_active(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
) -> Result<Json<ChatbotActiveResponse>> {
    let active = chatbot_lifecycle::is_chatbot_active(state.chatbots.as_ref(), chatbot_id)
        .await
        .inspect_err(|e| log_handler_error("get_active", e))?;

    Ok(Json(ChatbotActiveResponse { active }))
}

// ============================================================================
// STATE CHANGES
// ============================================================================

/// PUT /api/v1/chatbots/{id}/state
///
/// # Request Body
/// - `status`: Target status (`DRAFT`, `ACTIVE`, `INACTIVE`, `DELETED`)
///
/// # HTTP Status Codes
/// - `200 OK`: Updated chatbot
/// - `404 NOT_FOUND`: Chatbot not found
/// - `409 CONFLICT`: Transition not allowed (with `details`) or lost race
pub async fn change_state(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
    Json(request): Json<ChangeStateRequest>,
) -> Result<Json<ChatbotResponse>> {
    apply(&state, chatbot_id, request.status, "change_state").await
}

/// POST /api/v1/chatbots/{id}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
) -> Result<Json<ChatbotResponse>> {
    apply(&state, chatbot_id, ChatbotStatus::Active, "activate").await
}

/// POST /api/v1/chatbots/{id}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
) -> Result<Json<ChatbotResponse>> {
    apply(&state, chatbot_id, ChatbotStatus::Inactive, "deactivate").await
}

/// POST /api/v1/chatbots/{id}/draft
pub async fn set_draft(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
) -> Result<Json<ChatbotResponse>> {
    apply(&state, chatbot_id, ChatbotStatus::Draft, "set_draft").await
}

/// DELETE /api/v1/chatbots/{id}
///
/// Soft delete; the record is kept with status `DELETED`.
pub async fn delete(
    State(state): State<AppState>,
    Path(chatbot_id): Path<Uuid>,
) -> Result<Json<ChatbotResponse>> {
    apply(&state, chatbot_id, ChatbotStatus::Deleted, "delete").await
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

async fn apply(
    state: &AppState,
    chatbot_id: Uuid,
    new_state: ChatbotStatus,
    operation: &'static str,
) -> Result<Json<ChatbotResponse>> {
    tracing::info!(
        operation = operation,
        chatbot_id = %chatbot_id,
        new_state = %new_state,
        "Changing chatbot state",
    );

    let chatbot =
        chatbot_lifecycle::change_chatbot_state(state.chatbots.as_ref(), chatbot_id, new_state)
            .await
            .inspect_err(|e| log_handler_error(operation, e))?;

    tracing::info!(
        operation = operation,
        chatbot_id = %chatbot_id,
        status = %chatbot.status,
        "Chatbot state changed successfully",
    );

    Ok(Json(ChatbotResponse { chatbot }))
}

/// Helper to log handler errors with appropriate level
fn log_handler_error(operation: &str, e: &crate::error::Error) {
    if e.is_client_error() {
        tracing::warn!(operation = operation, error = %e, "Handler operation failed");
    } else {
        tracing::error!(operation = operation, error = %e, "Handler operation failed");
    }
}
