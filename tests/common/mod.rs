pub mod database;
pub mod fixtures;
pub mod test_app;

pub use database::TestDb;
pub use fixtures::{chatbot_with_state, seeded_store};
pub use test_app::TestApp;
