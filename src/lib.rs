pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod gemini;
pub mod imagery;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod roster;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::InsightGateway;
pub use gemini::{GeminiClient, TextGenerator};
