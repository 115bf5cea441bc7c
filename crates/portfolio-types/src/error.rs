use thiserror::Error;

/// Failures of the dashboard and its backend calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// The request could not be sent or no response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status} from {path}")]
    Http {
        /// Response status code.
        status: u16,
        /// Request path and query.
        path: String,
    },

    /// An endpoint string could not be turned into a request URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local file system failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl PortfolioError {
    /// True for the kinds a data loader can produce.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            PortfolioError::Network(_)
                | PortfolioError::Http { .. }
                | PortfolioError::Decode(_)
                | PortfolioError::NotFound(_)
                | PortfolioError::InvalidEndpoint(_)
        )
    }
}

/// Result alias for [`PortfolioError`].
pub type PortfolioResult<T> = Result<T, PortfolioError>;
