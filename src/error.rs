use thiserror::Error;

use crate::construct::Rejection;

/// Code carried by invariant violations raised from aggregations that found
/// an empty result where one was guaranteed.
pub const INVALID_STATE: u16 = 250;

#[derive(Error, Debug)]
pub enum CarlotError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation failed: {}", list_rejections(.0))]
    Validation(Vec<Rejection>),
    #[error("Parse error: '{input}' is not a valid {expected}")]
    Parse { input: String, expected: &'static str },
    #[error("Invalid state [CODE_{code}]: {message}")]
    Invariant { code: u16, message: String },
}

impl CarlotError {
    pub fn parse(input: &str, expected: &'static str) -> Self {
        Self::Parse { input: input.to_string(), expected }
    }
    pub fn invalid_state(message: &str) -> Self {
        Self::Invariant { code: INVALID_STATE, message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, CarlotError>;

fn list_rejections(rejections: &[Rejection]) -> String {
    rejections
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// Helper conversions
impl From<config::ConfigError> for CarlotError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
