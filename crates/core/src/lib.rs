//! ToolQuote Core - Shared types library.
//!
//! This crate provides common types used across all ToolQuote components:
//! - `client` - Catalog, cart, and quote-submission library
//! - `cli` - Terminal front end for the catalog and quote flow
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, and phone numbers, plus the
//!   `Product` record and quotation kinds

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
