use thiserror::Error;

/// A result type for sweep generation
pub type Result<T> = std::result::Result<T, SweepError>;

/// An error when configuring or writing a sweep
#[derive(Error, Debug)]
pub enum SweepError {
    /// When configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When reading a configuration or writing build rules fails
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// When a configuration cannot be (de)serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
