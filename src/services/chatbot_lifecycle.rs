//! Chatbot Lifecycle Service
//!
//! Guards which status changes a chatbot may go through and applies them
//! while keeping `is_active` in step with `status`.
//!
//! ```text
//!   DRAFT <────> ACTIVE <────> INACTIVE
//!     ^                           |
//!     └───────────────────────────┘
//!   (any of the above) ──> DELETED (terminal, soft delete)
//! ```

use crate::{
    error::{Error, Result},
    models::chatbot::{
        Chatbot, ChatbotState, ChatbotStatePatch, ChatbotStatus, INVALID_STATE_TRANSITION,
        StateTransitionError, TransitionDetails,
    },
    services::chatbot_store::ChatbotStore,
};
use uuid::Uuid;

// ============================================================================
// TRANSITION RULES
// ============================================================================

/// States reachable from `current`, not counting `current` itself.
pub fn allowed_transitions(current: ChatbotStatus) -> &'static [ChatbotStatus] {
    use ChatbotStatus::*;

    match current {
        Draft => &[Active, Inactive, Deleted],
        Active => &[Inactive, Draft, Deleted],
        Inactive => &[Active, Draft, Deleted],
        Deleted => &[],
    }
}

/// Validates a status change without touching storage.
///
/// Staying in the same state is always valid, including for `Deleted`.
///
/// # Errors
/// A [`StateTransitionError`] naming both states and listing what `current`
/// may move to.
pub fn validate_state_transition(
    current: ChatbotStatus,
    next: ChatbotStatus,
) -> std::result::Result<(), StateTransitionError> {
    if current == next {
        return Ok(());
    }

    let allowed = allowed_transitions(current);
    if allowed.contains(&next) {
        return Ok(());
    }

    tracing::warn!(
        current_state = %current,
        new_state = %next,
        "[ChatbotLifecycle] Service: Invalid state transition"
    );

    Err(StateTransitionError {
        code: INVALID_STATE_TRANSITION.to_string(),
        message: format!("Invalid state transition from {} to {}", current, next),
        details: TransitionDetails {
            current_state: current,
            new_state: next,
            allowed_transitions: allowed.to_vec(),
        },
    })
}

// ============================================================================
// STATE CHANGES
// ============================================================================

/// Moves a chatbot to `new_state`.
///
/// # Errors
/// * `NotFound` - If the chatbot doesn't exist
/// * `InvalidStateTransition` - If the move is not allowed; nothing is written
/// * `Conflict` - If the status changed between the read and the write
pub async fn change_chatbot_state(
    store: &dyn ChatbotStore,
    id: Uuid,
    new_state: ChatbotStatus,
) -> Result<Chatbot> {
    tracing::info!(
        chatbot_id = %id,
        new_state = %new_state,
        "[ChatbotLifecycle] Service: Changing chatbot state"
    );

    let chatbot = find_chatbot(store, id).await?;

    validate_state_transition(chatbot.status, new_state).map_err(Error::InvalidStateTransition)?;

    let patch = ChatbotStatePatch::for_status(new_state);
    let updated = store
        .update_state(id, chatbot.status, patch)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                chatbot_id = %id,
                expected_state = %chatbot.status,
                "[ChatbotLifecycle] Service: Chatbot changed concurrently, write skipped"
            );
            Error::Conflict(format!(
                "Chatbot {} was modified concurrently; expected status {}",
                id, chatbot.status
            ))
        })?;

    tracing::info!(
        chatbot_id = %id,
        old_state = %chatbot.status,
        new_state = %updated.status,
        is_active = updated.is_active,
        "[ChatbotLifecycle] Service: Chatbot state changed"
    );

    Ok(updated)
}

/// Publishes a chatbot.
pub async fn activate_chatbot(store: &dyn ChatbotStore, id: Uuid) -> Result<Chatbot> {
    change_chatbot_state(store, id, ChatbotStatus::Active).await
}

/// Switches a chatbot off without unpublishing its configuration.
pub async fn deactivate_chatbot(store: &dyn ChatbotStore, id: Uuid) -> Result<Chatbot> {
    change_chatbot_state(store, id, ChatbotStatus::Inactive).await
}

/// Puts a chatbot back into draft for editing.
pub async fn set_to_draft_mode(store: &dyn ChatbotStore, id: Uuid) -> Result<Chatbot> {
    change_chatbot_state(store, id, ChatbotStatus::Draft).await
}

/// Soft delete: the record and its history stay in storage.
pub async fn mark_chatbot_as_deleted(store: &dyn ChatbotStore, id: Uuid) -> Result<Chatbot> {
    change_chatbot_state(store, id, ChatbotStatus::Deleted).await
}

// ============================================================================
// QUERIES
// ============================================================================

/// Returns the lifecycle fields of a chatbot.
///
/// # Errors
/// * `NotFound` - If the chatbot doesn't exist
pub async fn get_chatbot_state(store: &dyn ChatbotStore, id: Uuid) -> Result<ChatbotState> {
    Ok(find_chatbot(store, id).await?.state())
}

pub async fn is_chatbot_in_state(
    store: &dyn ChatbotStore,
    id: Uuid,
    state: ChatbotStatus,
) -> Result<bool> {
    Ok(get_chatbot_state(store, id).await?.status == state)
}

/// True only when the status is Active and the flag agrees.
pub async fn is_chatbot_active(store: &dyn ChatbotStore, id: Uuid) -> Result<bool> {
    let state = get_chatbot_state(store, id).await?;

    if (state.status == ChatbotStatus::Active) != state.is_active {
        tracing::warn!(
            chatbot_id = %id,
            status = %state.status,
            is_active = state.is_active,
            "[ChatbotLifecycle] Service: Status and is_active disagree"
        );
    }

    Ok(state.status == ChatbotStatus::Active && state.is_active)
}

async fn find_chatbot(store: &dyn ChatbotStore, id: Uuid) -> Result<Chatbot> {
    store.find_by_id(id).await?.ok_or_else(|| {
        tracing::debug!(chatbot_id = %id, "[ChatbotLifecycle] Service: Chatbot not found");
        Error::NotFound(format!("Chatbot {} not found", id))
    })
}
