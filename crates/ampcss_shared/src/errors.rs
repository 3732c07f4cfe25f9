//! Error results that can be returned from the validator crates
use thiserror::Error;

/// Serious errors and errors from third-party libraries. Problems found in the
/// validated CSS itself are never reported through this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("json parsing error: {0}")]
    JsonSerde(#[from] serde_json::Error),
}
