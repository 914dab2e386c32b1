use thiserror::Error;

/// Top-level error type for fitbot.
#[derive(Debug, Error)]
pub enum BotError {
    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid menu tree definition.
    #[error("menu error: {0}")]
    Menu(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
