//! Quote requests: the form, the submission flow, and the backend client.
//!
//! A quote starts in the form ([`form::QuoteForm`]), travels through the
//! submission state machine ([`flow::SubmissionFlow`]), and reaches the
//! backend via [`client::QuoteClient`]. The wire types live here.

pub mod client;
pub mod flow;
pub mod form;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use toolquote_core::{Email, QuotationType};

pub use client::{QuoteClient, QuoteDocument};
pub use flow::{FlowState, SendOutcome, SubmissionFlow, SubmitOutcome};
pub use form::{FieldReport, QuoteForm, MIN_DESCRIPTION_LEN};

/// Errors raised while generating or dispatching a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Transport-level failure reaching the quote backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("quote backend returned status {status}")]
    Status {
        /// HTTP status code returned by the backend.
        status: u16,
    },

    /// The response envelope could not be parsed.
    #[error("failed to parse quote response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document payload was not valid base64.
    #[error("quote document was not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    /// The backend generated the document but could not deliver it.
    #[error("quote dispatch failed: {message}")]
    Dispatch {
        /// Failure detail reported by the backend.
        message: String,
    },

    /// Writing the document to disk failed.
    #[error("could not save quote document: {0}")]
    Save(#[from] std::io::Error),
}

/// One line of the quote: a product reference and the quantity requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    /// Product identifier.
    pub product_id: toolquote_core::ProductId,
    /// Product display name, echoed into the generated document.
    pub product_name: String,
    /// Brand, from the cart entry's product snapshot.
    pub brand: String,
    /// Purpose, from the cart entry's product snapshot.
    pub purpose: String,
    /// Units requested.
    pub quantity: u32,
}

/// The full quote request sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Cart lines, in cart order.
    pub items: Vec<QuoteItem>,
    /// Customer's full name.
    pub customer_name: String,
    /// Customer phone in `+<code> <national>` form.
    pub customer_phone: String,
    /// Customer email, when provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<Email>,
    /// What the customer wants done.
    pub quotation_type: QuotationType,
    /// Free-text description, required for maintenance service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_description: Option<String>,
    /// Configured internal recipients for the generated document.
    pub recipient_addresses: Vec<Email>,
}
