use thiserror::Error;

/// Failures surfaced by the audio engine and its backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AudioError {
    #[error("{0} node could not be created: {1}")]
    NodeCreation(&'static str, String),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("failed to load or decode {asset}: {reason}")]
    Decode { asset: String, reason: String },
    #[error("music buffer for {0} is not loaded")]
    MissingBuffer(&'static str),
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Raised when a preset key from the UI does not name a known preset.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown preset key: {0:?}")]
pub struct PresetError(pub String);
