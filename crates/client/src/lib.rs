//! ToolQuote client library - catalog browsing, cart, and quote submission.
//!
//! This crate holds the session-side core of the storefront: it fetches the
//! product catalog, maintains the cross-filtered facet options, owns the
//! persisted cart, validates the quote form, and drives the
//! submit → generate → present → send flow against the quoting backend.
//!
//! # Architecture
//!
//! - Pure state and validation layers ([`catalog::filter`], [`cart`],
//!   [`quote::form`]) with no I/O, testable in isolation
//! - Thin `reqwest` clients for the two backend collaborators
//!   ([`catalog::CatalogClient`], [`quote::QuoteClient`])
//! - Persistence behind the [`storage::KeyValueStore`] trait; user-facing
//!   messages behind the [`notify::Notify`] trait
//!
//! # Modules
//!
//! - [`catalog`] - Product feed client, scheduled refresh, facet filtering,
//!   keyed grid reconciliation
//! - [`cart`] - Cart store with stock ceilings and durable persistence
//! - [`quote`] - Quote form validation and the submission state machine
//! - [`config`] - Environment-based configuration
//! - [`storage`] - Key-value persistence (file-backed and in-memory)
//! - [`notify`] - Toast notification surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod quote;
pub mod storage;

pub use error::AppError;
