//! Catalog client error taxonomy.
//!
//! Only hard failures are errors. A non-2xx answer to a read, a delete or a
//! favorite toggle is a soft failure and comes back as `Ok(None)` or
//! `Ok(false)` from the operation itself.

use thiserror::Error;

/// Result alias used by every catalog operation.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors returned by `CatalogClient`.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CatalogError {
    /// A protected operation was called on a client without a bearer token.
    /// No request was sent.
    #[error("authentication required for {operation}: log in first")]
    AuthenticationRequired {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// The server rejected a create/update request.
    #[error("catalog API request failed (HTTP {status}): {body}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A success body was not the expected JSON.
    #[error("{context}")]
    Decode {
        /// Endpoint and stage that failed.
        context: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be sent or its body could not be read.
    #[error("{context}")]
    Transport {
        /// Endpoint and stage that failed.
        context: String,
        /// Underlying HTTP client error.
        #[source]
        source: reqwest::Error,
    },

    /// An endpoint path could not be joined onto the base URL.
    #[error("failed to join URL path: {path}")]
    Url {
        /// Relative endpoint path.
        path: String,
        /// Underlying URL error.
        #[source]
        source: url::ParseError,
    },

    /// The client was configured incorrectly.
    #[error("{0}")]
    Config(String),
}

impl CatalogError {
    /// HTTP status carried by a `Remote` error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for `AuthenticationRequired`.
    #[must_use]
    pub const fn is_authentication_required(&self) -> bool {
        matches!(self, Self::AuthenticationRequired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_carries_status_and_body() {
        // Arrange
        let err = CatalogError::Remote {
            status: 422,
            body: String::from(r#"{"message":"The name field is required."}"#),
        };

        // Act
        let message = err.to_string();

        // Assert
        assert!(message.contains("HTTP 422"));
        assert!(message.contains("The name field is required."));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_authentication_required_names_operation() {
        // Arrange
        let err = CatalogError::AuthenticationRequired {
            operation: "movies",
        };

        // Act & Assert
        assert!(err.is_authentication_required());
        assert!(err.to_string().contains("movies"));
        assert_eq!(err.status(), None);
    }
}
