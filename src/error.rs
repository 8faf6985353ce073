#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Missing API credentials: client id and client secret are both required")]
    MissingCredentials,

    #[error("Upstream error from {endpoint}: HTTP {status}")]
    Upstream { endpoint: &'static str, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MarketError {
    /// True for the errors raised while talking to the upstream API
    /// (missing credentials, non-success status, transport failure).
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(
            self,
            MarketError::MissingCredentials | MarketError::Upstream { .. } | MarketError::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;
