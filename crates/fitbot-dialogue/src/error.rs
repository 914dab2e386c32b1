use fitbot_core::stage::Stage;
use thiserror::Error;

/// Errors raised while loading a menu tree or running a transition.
#[derive(Debug, Error)]
pub enum DialogueError {
    /// The tree has no node for this stage.
    #[error("no menu node for stage {0}")]
    UnknownStage(Stage),

    /// A template referenced form data that was never collected.
    #[error("template field '{0}' is not set")]
    MissingField(String),

    /// The node has no rule for this kind of input.
    #[error("stage {0} has no rule for this input")]
    Unhandled(Stage),

    /// The tree failed validation.
    #[error("invalid menu tree: {0}")]
    InvalidTree(String),

    /// A menu file could not be parsed.
    #[error("failed to parse menu file: {0}")]
    Parse(#[from] toml::de::Error),

    /// I/O error while reading a menu file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
