//! Data-access seam for the chatbot lifecycle.
//!
//! The lifecycle service only needs to look a chatbot up and write its
//! status fields. [`PgChatbotStore`] does that against Postgres,
//! [`InMemoryChatbotStore`] keeps records in process for fixtures and local
//! runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    database::DbPool,
    error::{Error, Result},
    models::chatbot::{Chatbot, ChatbotStatePatch, ChatbotStatus},
    queries::chatbots,
};

#[async_trait]
pub trait ChatbotStore: Send + Sync {
    /// Looks a chatbot up by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>>;

    /// Applies `patch` if the stored status still equals `expected`.
    ///
    /// Returns `None` when nothing was written.
    async fn update_state(
        &self,
        id: Uuid,
        expected: ChatbotStatus,
        patch: ChatbotStatePatch,
    ) -> Result<Option<Chatbot>>;
}

/// Postgres-backed store
#[derive(Debug, Clone)]
pub struct PgChatbotStore {
    pool: DbPool,
}

impl PgChatbotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>> {
        self.pool.acquire().await.map_err(|e| {
            tracing::error!(
                error_code = "DATABASE_ACQUISITION_FAILED",
                error = %e,
                "[ChatbotStore] Failed to acquire database connection"
            );
            Error::Internal(format!("Failed to acquire database connection: {}", e))
        })
    }
}

#[async_trait]
impl ChatbotStore for PgChatbotStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>> {
        let mut conn = self.acquire().await?;
        chatbots::get_chatbot_by_id(&mut conn, id).await
    }

    async fn update_state(
        &self,
        id: Uuid,
        expected: ChatbotStatus,
        patch: ChatbotStatePatch,
    ) -> Result<Option<Chatbot>> {
        let mut conn = self.acquire().await?;
        chatbots::update_chatbot_state(&mut conn, id, expected, patch).await
    }
}

/// In-process store keyed by chatbot ID
#[derive(Debug, Default)]
pub struct InMemoryChatbotStore {
    records: RwLock<HashMap<Uuid, Chatbot>>,
    writes: AtomicUsize,
}

impl InMemoryChatbotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record as-is, without any lifecycle checks.
    pub async fn insert(&self, chatbot: Chatbot) {
        self.records.write().await.insert(chatbot.id, chatbot);
    }

    /// Number of successful `update_state` writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatbotStore for InMemoryChatbotStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chatbot>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update_state(
        &self,
        id: Uuid,
        expected: ChatbotStatus,
        patch: ChatbotStatePatch,
    ) -> Result<Option<Chatbot>> {
        let mut records = self.records.write().await;

        let Some(chatbot) = records.get_mut(&id) else {
            return Ok(None);
        };
        if chatbot.status != expected {
            return Ok(None);
        }

        chatbot.status = patch.status;
        chatbot.is_active = patch.is_active;
        chatbot.updated_at = Utc::now();
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(Some(chatbot.clone()))
    }
}
