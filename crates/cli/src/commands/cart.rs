//! Cart commands.
//!
//! The cart lives in the file store at `TOOLQUOTE_STORAGE_PATH`, so it
//! survives between invocations the way the browser cart survives reloads.

use toolquote_client::config::ClientConfig;
use toolquote_client::AppError;

use super::{open_cart, CommandError};

/// Add a product from the catalog to the cart.
pub async fn add(product_id: &str, quantity: u32) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;

    let client = toolquote_client::catalog::CatalogClient::new(config.catalog_url.clone());
    let products = client.fetch_all().await.map_err(AppError::from)?;
    let product = products
        .iter()
        .find(|p| p.id.as_str() == product_id)
        .ok_or_else(|| CommandError::ProductNotFound(product_id.to_owned()))?;

    let mut cart = open_cart(&config)?;
    cart.add_or_increment(product, quantity)
        .map_err(AppError::from)?;
    tracing::info!("Cart now holds {} units", cart.total_units());
    Ok(())
}

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn list() -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let cart = open_cart(&config)?;

    if cart.is_empty() {
        tracing::info!("The cart is empty");
        return Ok(());
    }

    for (index, entry) in cart.entries().iter().enumerate() {
        println!(
            "[{index}] {}  x{} (max {})",
            entry.product.name, entry.quantity, entry.stock_ceiling
        );
    }
    println!("Total: {} units", cart.total_units());
    Ok(())
}

/// Set an entry's quantity from raw input.
pub fn set(index: usize, quantity: &str) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let mut cart = open_cart(&config)?;

    let stored = cart
        .set_quantity(index, Some(quantity))
        .map_err(AppError::from)?;
    tracing::info!("Entry {index} set to {stored} units");
    Ok(())
}

/// Remove an entry.
pub fn remove(index: usize) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let mut cart = open_cart(&config)?;

    let entry = cart.remove(index).map_err(AppError::from)?;
    tracing::info!("Removed \"{}\"", entry.product.name);
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let mut cart = open_cart(&config)?;

    cart.clear().map_err(AppError::from)?;
    tracing::info!("Cart cleared");
    Ok(())
}
