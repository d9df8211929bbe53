use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Whether a retry has any chance of succeeding. Rate limits, auth
    /// failures and malformed requests are terminal; timeouts, 5xx and
    /// transport-level failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Server(_) | Error::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_transient_classification() {
        assert!(Error::Timeout(Duration::from_secs(10)).is_transient());
        assert!(Error::Server("502 Bad Gateway".to_string()).is_transient());
        assert!(!Error::RateLimited.is_transient());
        assert!(!Error::Unauthorized.is_transient());
        assert!(!Error::Client("400 Bad Request".to_string()).is_transient());
        assert!(!Error::Validation("keyword is required".to_string()).is_transient());
    }
}
