/// `DOMException` name raised when a write would exceed the area's quota
pub const QUOTA_EXCEEDED: &str = "QuotaExceededError";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebStorageError {
    #[error("No global window")]
    NoWindow,

    #[error("Storage area {0} is unavailable")]
    Unavailable(&'static str),

    #[error("{name}: {message}")]
    Exception { name: String, message: String },
}

impl WebStorageError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, WebStorageError::Exception { name, .. } if name == QUOTA_EXCEEDED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_exceeded() {
        let error = WebStorageError::Exception {
            name: QUOTA_EXCEEDED.to_string(),
            message: "The quota has been exceeded.".to_string(),
        };
        assert!(error.is_quota_exceeded());
        assert_eq!(
            error.to_string(),
            "QuotaExceededError: The quota has been exceeded."
        );

        assert!(!WebStorageError::NoWindow.is_quota_exceeded());
        assert!(!WebStorageError::Unavailable("localStorage").is_quota_exceeded());
    }

    #[test]
    fn test_unavailable_message() {
        assert_eq!(
            WebStorageError::Unavailable("sessionStorage").to_string(),
            "Storage area sessionStorage is unavailable"
        );
    }
}
