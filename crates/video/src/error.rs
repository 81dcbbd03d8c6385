use std::fmt;

#[derive(Debug)]
pub enum VideoError {
    /// The input could not be opened; nothing was processed
    StreamOpen(String),
    Decode(String),
    Encode(String),
    /// Processing stopped through the cancel flag
    Cancelled,
    Worker(String),
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::StreamOpen(msg) => write!(f, "stream open error: {msg}"),
            VideoError::Decode(msg) => write!(f, "decode error: {msg}"),
            VideoError::Encode(msg) => write!(f, "encode error: {msg}"),
            VideoError::Cancelled => write!(f, "cancelled"),
            VideoError::Worker(msg) => write!(f, "worker error: {msg}"),
        }
    }
}

impl std::error::Error for VideoError {}

impl From<std::io::Error> for VideoError {
    fn from(err: std::io::Error) -> Self {
        VideoError::StreamOpen(err.to_string())
    }
}

impl From<image::ImageError> for VideoError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Encode(msg) => VideoError::Encode(msg),
            other => VideoError::Decode(other.to_string()),
        }
    }
}
