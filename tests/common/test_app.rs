use formmy::{AppState, agents::AgentCore, app, services::chatbot_store::InMemoryChatbotStore};
use reqwest::Client;
use std::sync::Arc;
use tokio::net::TcpListener;

/// HTTP test application wrapper
///
/// Runs the router on a random port against an in-memory chatbot store, so
/// each test gets its own server and its own data.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Store behind the server, for seeding and inspecting records
    pub store: Arc<InMemoryChatbotStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryChatbotStore::new());
        let state = AppState::new(store.clone(), AgentCore::default());

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(listener, app(state)).await.unwrap();
        });

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            store,
        }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
