use thiserror::Error;

pub type Result<T, E = LookupError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request to {url} failed: {detail}")]
    Transport { url: String, detail: String },

    #[error("{url} answered {status} {reason}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("unexpected {lookup} payload: {detail}")]
    DataShape { lookup: &'static str, detail: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl LookupError {
    pub fn data_shape(lookup: &'static str, detail: impl Into<String>) -> Self {
        LookupError::DataShape {
            lookup,
            detail: detail.into(),
        }
    }

    /// Short name of the failure category, used when reporting to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::Transport { .. } => "transport",
            LookupError::HttpStatus { .. } => "http status",
            LookupError::DataShape { .. } => "data shape",
            LookupError::Config(_) => "config",
            LookupError::WorkerPool(_) => "worker pool",
        }
    }
}
