use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use std::fmt;

/// Error code reported when the lifecycle rejects a status change
pub const INVALID_STATE_TRANSITION: &str = "INVALID_STATE_TRANSITION";

/// Chatbot status enum - the canonical lifecycle state of a chatbot
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ChatbotStatus {
    /// Being configured, not yet published
    Draft,
    /// Published and answering conversations
    Active,
    /// Published but switched off
    Inactive,
    /// Soft-deleted (terminal state)
    Deleted,
}

impl ChatbotStatus {
    pub const ALL: [ChatbotStatus; 4] = [
        ChatbotStatus::Draft,
        ChatbotStatus::Active,
        ChatbotStatus::Inactive,
        ChatbotStatus::Deleted,
    ];

    /// Returns true for Deleted, which has no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Chatbot entity - only the lifecycle fields are managed by this crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Chatbot {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub slug: String,
    pub status: ChatbotStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chatbot {
    /// Projection of the lifecycle fields.
    pub fn state(&self) -> ChatbotState {
        ChatbotState {
            status: self.status,
            is_active: self.is_active,
        }
    }
}

/// Lifecycle fields of a chatbot (status plus the derived flag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotState {
    pub status: ChatbotStatus,
    pub is_active: bool,
}

/// Patch written to the store when a transition is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatbotStatePatch {
    pub status: ChatbotStatus,
    pub is_active: bool,
}

impl ChatbotStatePatch {
    /// Builds the patch for a target status, deriving `is_active`.
    pub fn for_status(status: ChatbotStatus) -> Self {
        Self {
            status,
            is_active: status == ChatbotStatus::Active,
        }
    }
}

/// Payload echoed back with a rejected transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionDetails {
    pub current_state: ChatbotStatus,
    pub new_state: ChatbotStatus,
    pub allowed_transitions: Vec<ChatbotStatus>,
}

/// Structured failure returned by transition validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransitionError {
    pub code: String,
    pub message: String,
    pub details: TransitionDetails,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StateTransitionError {}

/// Request body for an explicit status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStateRequest {
    pub status: ChatbotStatus,
}

/// Response wrapping an updated chatbot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotResponse {
    pub chatbot: Chatbot,
}

/// Response for the active check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotActiveResponse {
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trips_as_uppercase() {
        assert_eq!(ChatbotStatus::Inactive.to_string(), "INACTIVE");
        assert_eq!(ChatbotStatus::from_str("DELETED").unwrap(), ChatbotStatus::Deleted);
        assert_eq!(
            serde_json::to_value(ChatbotStatus::Draft).unwrap(),
            serde_json::json!("DRAFT")
        );
    }

    #[test]
    fn test_patch_derives_active_flag() {
        for status in ChatbotStatus::ALL {
            let patch = ChatbotStatePatch::for_status(status);
            assert_eq!(patch.is_active, status == ChatbotStatus::Active);
        }
    }

    #[test]
    fn test_only_deleted_is_terminal() {
        assert!(ChatbotStatus::Deleted.is_terminal());
        assert!(!ChatbotStatus::Draft.is_terminal());
        assert!(!ChatbotStatus::Active.is_terminal());
        assert!(!ChatbotStatus::Inactive.is_terminal());
    }
}
