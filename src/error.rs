use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dump JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A dump record without the fields a document needs.
    #[error("record {index} rejected: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Raised by a sentence segmenter that cannot handle its input.
#[derive(Debug, Error)]
#[error("sentence segmentation failed: {0}")]
pub struct SegmentError(pub String);

pub type Result<T> = std::result::Result<T, Error>;
