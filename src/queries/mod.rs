pub mod chatbots;
