use thiserror::Error;

/// Result type alias for SEAL-ISAC operations
pub type Result<T> = std::result::Result<T, IsacError>;

/// Errors that can occur when talking to the threat-intel store
///
/// Absence of a record is never an error: lookups return `Option`.
#[derive(Error, Debug)]
pub enum IsacError {
    /// Authentication failed - invalid or missing API key
    #[error("authentication failed: invalid API key")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Store returned a non-success HTTP response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the API
        message: String,
    },

    /// Store answered with a GraphQL `errors` array
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Content could not be interpreted as the requested kind
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Store response was missing a payload the operation depends on
    #[error("store response missing data: {0}")]
    MissingData(String),
}

impl IsacError {
    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<url::ParseError> for IsacError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(IsacError::Unauthorized.status_code(), Some(401));
        assert_eq!(
            IsacError::RateLimited { retry_after: None }.status_code(),
            Some(429)
        );
        assert_eq!(
            IsacError::Api {
                code: 502,
                message: "bad gateway".into()
            }
            .status_code(),
            Some(502)
        );
        assert_eq!(IsacError::GraphQl("boom".into()).status_code(), None);
    }

    #[test]
    fn test_auth_error() {
        assert!(IsacError::Unauthorized.is_auth_error());
        assert!(!IsacError::Http("reset".into()).is_auth_error());
    }

    #[test]
    fn test_url_parse_error_converts() {
        let err: IsacError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, IsacError::InvalidUrl(_)));
    }
}
