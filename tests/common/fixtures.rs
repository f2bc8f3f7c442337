use chrono::Utc;
use formmy::models::chatbot::{Chatbot, ChatbotStatus};
use formmy::services::chatbot_store::InMemoryChatbotStore;
use uuid::Uuid;

/// Builds a chatbot record with explicit lifecycle fields.
///
/// `is_active` is taken as given so tests can simulate drift between the two
/// fields.
pub fn chatbot_with_state(status: ChatbotStatus, is_active: bool) -> Chatbot {
    let now = Utc::now();
    let slug = format!("test-bot-{}", nanoid::nanoid!(8).to_lowercase());

    Chatbot {
        id: Uuid::now_v7(),
        user_id: Uuid::now_v7(),
        name: format!("Test Bot {}", slug),
        slug,
        status,
        is_active,
        created_at: now,
        updated_at: now,
    }
}

/// Creates an in-memory store holding one consistent chatbot in `status`.
pub async fn seeded_store(status: ChatbotStatus) -> (InMemoryChatbotStore, Uuid) {
    let store = InMemoryChatbotStore::new();
    let chatbot = chatbot_with_state(status, status == ChatbotStatus::Active);
    let id = chatbot.id;
    store.insert(chatbot).await;
    (store, id)
}
