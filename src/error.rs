//! Error types for the Atlas SDK

use thiserror::Error;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// SDK error taxonomy
///
/// Stores never let one of these escape: operation failures are converted
/// into in-store error state and the last-good data is retained. `Network`
/// and `Server` are the transient classes; `Permission` is never retried.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Malformed filter, coordinate, or status-transition input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced challenge or solution is absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Capability check failed
    #[error("Permission denied: {0}")]
    Permission(String),

    /// Backend unreachable or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with an error status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// JSON serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AtlasError {
    /// Classify an HTTP error status into the taxonomy.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 | 422 => AtlasError::Validation(message),
            401 | 403 => AtlasError::Permission(message),
            404 => AtlasError::NotFound(message),
            _ => AtlasError::Server { status, message },
        }
    }

    /// Whether a manual retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AtlasError::Network(_) | AtlasError::Server { status: 500..=599, .. }
        )
    }
}

impl From<reqwest::Error> for AtlasError {
    fn from(err: reqwest::Error) -> Self {
        AtlasError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            AtlasError::from_status(403, "nope".into()),
            AtlasError::Permission(_)
        ));
        assert!(matches!(
            AtlasError::from_status(404, "gone".into()),
            AtlasError::NotFound(_)
        ));
        assert!(matches!(
            AtlasError::from_status(422, "bad".into()),
            AtlasError::Validation(_)
        ));
        assert!(matches!(
            AtlasError::from_status(500, "boom".into()),
            AtlasError::Server { status: 500, .. }
        ));
    }

    #[test]
    fn transient_classes() {
        assert!(AtlasError::Network("down".into()).is_transient());
        assert!(AtlasError::Server { status: 503, message: String::new() }.is_transient());
        assert!(!AtlasError::Permission("no".into()).is_transient());
        assert!(!AtlasError::Validation("bad".into()).is_transient());
    }
}
