use chrono::Utc;
use formmy::{
    load_config,
    models::chatbot::{Chatbot, ChatbotStatus},
};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use std::sync::Once;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Connects to the configured database and applies migrations.
pub async fn init_test_db() -> PgPool {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
    });

    let config = load_config().expect("Failed to load config");
    let pool = PgPool::connect(config.database.connection_string().expose_secret())
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Test database wrapper scoping rows to one test
///
/// Every chatbot inserted through [`TestDb::insert_chatbot`] gets a slug
/// starting with `test_<test_name>-`, so parallel tests never touch each
/// other's rows and leftovers from an aborted run are removed on the next one.
pub struct TestDb {
    pub pool: PgPool,
    test_prefix: String,
}

impl TestDb {
    /// `test_name` should be the test function name.
    pub async fn new(test_name: &str) -> Self {
        let pool = init_test_db().await;
        let test_prefix = format!("test_{}", test_name);

        Self::cleanup_prefix(&pool, &test_prefix).await;

        Self { pool, test_prefix }
    }

    pub async fn get_connection(&self) -> sqlx::pool::PoolConnection<sqlx::Postgres> {
        self.pool
            .acquire()
            .await
            .expect("Failed to get database connection")
    }

    pub fn test_prefix(&self) -> &str {
        &self.test_prefix
    }

    /// Inserts a chatbot row with explicit lifecycle fields.
    pub async fn insert_chatbot(&self, status: ChatbotStatus, is_active: bool) -> Chatbot {
        let now = Utc::now();
        let slug = format!("{}-{}", self.test_prefix, nanoid::nanoid!(8).to_lowercase());

        sqlx::query_as::<_, Chatbot>(
            r#"
            INSERT INTO chatbots
                (id, user_id, name, slug, status, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, user_id, name, slug, status, is_active, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(Uuid::now_v7())
        .bind(format!("Test Bot {}", slug))
        .bind(&slug)
        .bind(status)
        .bind(is_active)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .expect("Failed to insert chatbot")
    }

    /// Reads the raw lifecycle columns, bypassing the query layer.
    pub async fn raw_state(&self, id: Uuid) -> (String, bool) {
        sqlx::query_as("SELECT status, is_active FROM chatbots WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .expect("Failed to read chatbot state")
    }

    async fn cleanup_prefix(pool: &PgPool, prefix: &str) {
        sqlx::query("DELETE FROM chatbots WHERE slug LIKE $1")
            .bind(format!("{}-%", prefix))
            .execute(pool)
            .await
            .expect("Failed to cleanup test data");
    }
}
