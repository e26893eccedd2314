//! Command implementations.

pub mod cart;
pub mod catalog;
pub mod quote;

use std::sync::Arc;

use thiserror::Error;

use toolquote_client::cart::CartStore;
use toolquote_client::config::{ClientConfig, ConfigError};
use toolquote_client::notify::TracingNotifier;
use toolquote_client::storage::{FileStore, StorageError};
use toolquote_client::AppError;

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A client operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Opening the persisted store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No product with the given id exists in the catalog.
    #[error("No product with id {0} in the catalog")]
    ProductNotFound(String),

    /// An argument did not parse.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Load configuration and open the persisted cart.
fn open_cart(config: &ClientConfig) -> Result<CartStore, CommandError> {
    let store = FileStore::open(&config.storage_path)?;
    Ok(CartStore::open(Arc::new(store), Arc::new(TracingNotifier)))
}
