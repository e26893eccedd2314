//! Core types for ToolQuote.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod phone;
pub mod product;
pub mod quotation;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use phone::{CountryCode, PhoneError, PhoneNumber, sanitize_digits};
pub use product::{DEFAULT_IMAGE_PATH, Product};
pub use quotation::{QuotationType, UnknownQuotationType};
