//! HTTP client for the quote backend.
//!
//! Two operations: `POST <quote_url>` generates the quote document, and
//! `POST <quote_url>/send` asks the backend to dispatch it to the configured
//! recipients. Generation can answer either with the raw PDF bytes or with a
//! JSON envelope carrying the document base64-encoded.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use url::Url;

use toolquote_core::Email;

use super::{QuoteError, QuoteRequest};

/// JSON envelope some backends answer generation with.
#[derive(Debug, Deserialize)]
struct GenerateEnvelope {
    /// Base64-encoded document bytes.
    document: String,
    /// Recipients the backend resolved, when it reports them.
    #[serde(default)]
    recipients: Vec<Email>,
}

/// Response to a dispatch request.
#[derive(Debug, Deserialize)]
struct SendResponse {
    ok: bool,
    message: Option<String>,
}

/// The generated quote document, held in memory until the user decides
/// whether to send it, download it, or discard it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteDocument {
    /// Raw PDF bytes.
    pub bytes: Vec<u8>,
    /// Recipients the document is addressed to.
    pub recipients: Vec<Email>,
}

impl QuoteDocument {
    /// Default filename when the user saves the document locally.
    pub const DEFAULT_FILENAME: &'static str = "quote.pdf";

    /// Write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Save`] if the write fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), QuoteError> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Client for the quote backend.
#[derive(Clone)]
pub struct QuoteClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl QuoteClient {
    /// Create a new quote client for the given backend endpoint.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Generate the quote document for a request.
    ///
    /// Accepts either a raw `application/pdf` body or a JSON envelope with a
    /// base64 `document` field.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError`] on transport failure, a non-2xx status, or an
    /// unrecognized response body.
    pub async fn generate(&self, request: &QuoteRequest) -> Result<QuoteDocument, QuoteError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "quote generation returned non-success status");
            return Err(QuoteError::Status {
                status: status.as_u16(),
            });
        }

        let is_pdf = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/pdf"));

        if is_pdf {
            let bytes = response.bytes().await?.to_vec();
            tracing::debug!(size = bytes.len(), "quote document received as pdf");
            return Ok(QuoteDocument {
                bytes,
                recipients: request.recipient_addresses.clone(),
            });
        }

        let body = response.text().await?;
        let envelope: GenerateEnvelope = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse quote generation response"
            );
        })?;

        let bytes = BASE64.decode(envelope.document)?;
        let recipients = if envelope.recipients.is_empty() {
            request.recipient_addresses.clone()
        } else {
            envelope.recipients
        };
        tracing::debug!(size = bytes.len(), "quote document received as envelope");
        Ok(QuoteDocument { bytes, recipients })
    }

    /// Ask the backend to dispatch the quote to its recipients.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::Dispatch`] when the backend reports a delivery
    /// failure, or [`QuoteError`] on transport and protocol problems.
    pub async fn send(&self, request: &QuoteRequest) -> Result<(), QuoteError> {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("send");
        }

        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = %status, "quote dispatch returned non-success status");
            return Err(QuoteError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: SendResponse = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse quote dispatch response"
            );
        })?;

        if !parsed.ok {
            return Err(QuoteError::Dispatch {
                message: parsed
                    .message
                    .unwrap_or_else(|| "delivery failed".to_owned()),
            });
        }
        Ok(())
    }
}
