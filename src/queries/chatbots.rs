use crate::{
    error::{Error, Result},
    models::chatbot::{Chatbot, ChatbotStatePatch, ChatbotStatus},
};
use uuid::Uuid;

use crate::DbConn;

/// Gets a single chatbot by its ID.
pub async fn get_chatbot_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<Chatbot>> {
    let chatbot = sqlx::query_as::<_, Chatbot>(
        r#"
        SELECT
            id,
            user_id,
            name,
            slug,
            status,
            is_active,
            created_at,
            updated_at
        FROM chatbots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(chatbot)
}

/// Writes the lifecycle fields of a chatbot, only if its status is still `expected`.
///
/// Returns `None` when no row matched: the chatbot is gone or another writer
/// changed its status first.
pub async fn update_chatbot_state(
    conn: &mut DbConn,
    id: Uuid,
    expected: ChatbotStatus,
    patch: ChatbotStatePatch,
) -> Result<Option<Chatbot>> {
    let chatbot = sqlx::query_as::<_, Chatbot>(
        r#"
        UPDATE chatbots
        SET status = $2, is_active = $3, updated_at = NOW()
        WHERE id = $1 AND status = $4
        RETURNING
            id,
            user_id,
            name,
            slug,
            status,
            is_active,
            created_at,
            updated_at
        "#,
    )
    .bind(id)
    .bind(patch.status)
    .bind(patch.is_active)
    .bind(expected)
    .fetch_optional(conn)
    .await
    .map_err(Error::Sqlx)?;

    Ok(chatbot)
}
