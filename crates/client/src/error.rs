//! Unified error handling for the client library.
//!
//! Each boundary (catalog feed, cart store, quote backend, config, storage)
//! defines its own `thiserror` enum next to the code that raises it. This
//! module provides the umbrella [`AppError`] used where the CLI needs a single
//! error type, plus the policy helper [`AppError::user_message`].
//!
//! Nothing here is fatal: callers at the UI boundary convert every variant
//! into a toast or log line and carry on.

use thiserror::Error;

use crate::cart::StoreError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::quote::QuoteError;
use crate::storage::StorageError;

/// Application-level error type for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog feed request failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart operation failed.
    #[error("cart error: {0}")]
    Store(#[from] StoreError),

    /// Quote generation or dispatch failed.
    #[error("quote error: {0}")]
    Quote(#[from] QuoteError),

    /// Configuration is missing or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Persistence failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Short message suitable for a toast.
    ///
    /// Transport details stay in the logs; the user sees what happened and
    /// whether retrying is up to them (network calls are never retried
    /// automatically).
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(_) => "Could not load products".to_owned(),
            Self::Store(e) => e.to_string(),
            Self::Quote(QuoteError::Dispatch { .. }) => {
                "Could not email the quote; you can still download it".to_owned()
            }
            Self::Quote(_) => "Could not generate the quote".to_owned(),
            Self::Config(e) => e.to_string(),
            Self::Storage(_) => "Could not save your changes".to_owned(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_transport_details() {
        let err = AppError::Quote(QuoteError::Status { status: 500 });
        let msg = err.user_message();
        assert!(!msg.contains("500"));
        assert!(msg.contains("quote"));
    }

    #[test]
    fn test_user_message_dispatch_offers_download() {
        let err = AppError::Quote(QuoteError::Dispatch {
            message: "smtp down".to_owned(),
        });
        assert!(err.user_message().contains("download"));
    }

    #[test]
    fn test_store_error_passthrough() {
        let err = AppError::Store(StoreError::InsufficientStock {
            name: "Impact Wrench".to_owned(),
            requested: 7,
            available: 5,
        });
        assert!(err.user_message().contains("Impact Wrench"));
    }
}
