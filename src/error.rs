use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Upload rejected: {message}")]
    Upload { message: String },

    #[error("Request rejected: {message}")]
    Rejected { message: String },
}

impl DashboardError {
    pub fn transport(message: impl Into<String>) -> Self {
        DashboardError::Transport { message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation { message: message.into() }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Transport { message: err.to_string() }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
