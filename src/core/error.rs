//! Error types for the data layer.
//!
//! Errors are grouped by the boundary they come from:
//!
//! - [`StoreError`] - Programmer errors raised by the store facade
//! - [`FetchError`] - Network/fetch failures for static JSON resources
//! - [`StorageError`] - localStorage failures for persisted preferences

use thiserror::Error;

/// Errors surfaced to callers of the store facade.
///
/// Fetch and storage failures never show up here; they degrade into empty
/// results instead. Only misuse of the store is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The resource name is not present in the descriptor registry.
    #[error("store: unknown resource \"{0}\"")]
    UnknownResource(String),
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// localStorage errors for preference persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// localStorage not available (private mode, disabled, no window).
    #[error("localStorage not available")]
    StorageUnavailable,
    /// Value could not be serialized to JSON.
    #[error("failed to serialize value: {0}")]
    SerializationFailed(String),
    /// Stored text is not valid JSON for the requested type.
    #[error("failed to parse stored value: {0}")]
    ParseFailed(String),
    /// Write rejected by the browser (quota exceeded, etc.)
    #[error("failed to save to localStorage")]
    SaveFailed,
    /// Read rejected by the browser.
    #[error("failed to read from localStorage")]
    ReadFailed,
    /// Remove rejected by the browser.
    #[error("failed to remove from localStorage")]
    RemoveFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_resource_message() {
        let err = StoreError::UnknownResource("not-a-real-resource".to_string());
        assert_eq!(
            err.to_string(),
            "store: unknown resource \"not-a-real-resource\""
        );
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::HttpError(404).to_string(), "HTTP error: 404");
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
    }
}
