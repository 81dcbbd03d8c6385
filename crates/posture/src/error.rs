use {crate::Joint, std::fmt};

#[derive(Debug)]
pub enum PostureError {
    /// A joint an angle rule needs was not detected
    MissingLandmark(Joint),
    NoPersonDetected,
    Decode(String),
    Estimator(String),
    InvalidLandmarks(String),
}

impl fmt::Display for PostureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostureError::MissingLandmark(joint) => write!(f, "missing landmark: {}", joint.name()),
            PostureError::NoPersonDetected => write!(f, "no person detected"),
            PostureError::Decode(msg) => write!(f, "decode error: {msg}"),
            PostureError::Estimator(msg) => write!(f, "estimator error: {msg}"),
            PostureError::InvalidLandmarks(msg) => write!(f, "invalid landmarks: {msg}"),
        }
    }
}

impl std::error::Error for PostureError {}

impl From<image::ImageError> for PostureError {
    fn from(err: image::ImageError) -> Self {
        PostureError::Decode(err.to_string())
    }
}
