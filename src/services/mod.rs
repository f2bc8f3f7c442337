pub mod chatbot_lifecycle;
pub mod chatbot_store;
