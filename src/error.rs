use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// The taxonomy is deliberately narrow: the only hard failure the widget
/// recognizes is broken embedded content, caught once at startup. Audio
/// trouble degrades to silence and never surfaces as an error.

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Failed to parse embedded question bank")]
    ParseFailed(#[source] serde_json::Error),

    #[error("Question bank is empty")]
    NoQuestions,

    #[error("Color palette is empty")]
    NoColors,

    #[error("Duplicate question id: {0}")]
    DuplicateId(u32),
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to create playback sink")]
    SinkFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}
