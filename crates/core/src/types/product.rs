//! Product record as served by the catalog feed.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Placeholder shown when a product has no usable image URL.
pub const DEFAULT_IMAGE_PATH: &str = "/assets/img/placeholder.png";

/// Prefix all trusted product images share. Images are hosted on Cloudinary;
/// anything else in the feed is ignored in favor of the placeholder.
const TRUSTED_IMAGE_PREFIX: &str = "https://res.cloudinary.com/";

/// A product from the catalog feed.
///
/// Read-only from the client's perspective: products are fetched, filtered,
/// and snapshotted into cart entries, never mutated. `available_stock` is the
/// stock known at fetch time and becomes the cart entry's ceiling when the
/// product is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier assigned by the feed.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Brand facet value.
    pub brand: String,
    /// Purpose facet value.
    pub purpose: String,
    /// Optional type facet value; absent in parts of the catalog.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional image URL; only trusted hosts are used for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Units available at fetch time.
    pub available_stock: u32,
}

impl Product {
    /// The image URL to display for this product.
    ///
    /// Falls back to [`DEFAULT_IMAGE_PATH`] when the feed's URL is missing or
    /// not hosted on the trusted image CDN.
    #[must_use]
    pub fn display_image_url(&self) -> &str {
        match self.image_url.as_deref() {
            Some(url) if is_trusted_image_url(url) => url,
            _ => DEFAULT_IMAGE_PATH,
        }
    }
}

/// Whether a URL points at the trusted image CDN upload path.
fn is_trusted_image_url(url: &str) -> bool {
    url.strip_prefix(TRUSTED_IMAGE_PREFIX)
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(cloud, path)| !cloud.is_empty() && path.starts_with("image/upload/"))
}
