use std::fmt;

#[derive(Debug)]
pub enum GestureError {
    Config(String),
    Parse(String),
    Io(String),
    Source(String),
    /// The pose source has no more frames.
    SourceClosed,
    Effect(String),
    Runtime(String),
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureError::Config(msg) => write!(f, "config error: {msg}"),
            GestureError::Parse(msg) => write!(f, "parse error: {msg}"),
            GestureError::Io(msg) => write!(f, "io error: {msg}"),
            GestureError::Source(msg) => write!(f, "source error: {msg}"),
            GestureError::SourceClosed => write!(f, "pose source closed"),
            GestureError::Effect(msg) => write!(f, "effect error: {msg}"),
            GestureError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for GestureError {}

impl From<std::io::Error> for GestureError {
    fn from(err: std::io::Error) -> Self {
        GestureError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GestureError {
    fn from(err: serde_json::Error) -> Self {
        GestureError::Parse(err.to_string())
    }
}

impl From<tokio::task::JoinError> for GestureError {
    fn from(err: tokio::task::JoinError) -> Self {
        GestureError::Runtime(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GestureError>;
