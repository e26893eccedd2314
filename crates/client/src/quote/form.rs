//! The quote form: synchronous field validation and the consent gate.
//!
//! Every setter re-validates immediately, so the form's gating state is
//! always current. The gate is a chain: all required fields valid enables
//! the consent checkbox, and only fields-valid plus consent-granted enables
//! submission. Any edit that invalidates a field revokes consent, so a
//! half-fixed form can never submit with stale agreement.

use toolquote_core::{
    sanitize_digits, CountryCode, Email, EmailError, PhoneError, PhoneNumber, QuotationType,
};

use super::{QuoteItem, QuoteRequest};
use crate::cart::CartEntry;

/// Minimum length of the maintenance-service description.
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Per-field validation outcome, for rendering inline feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldReport {
    /// Problem with the name field, if any.
    pub name: Option<String>,
    /// Problem with the phone field, if any.
    pub phone: Option<String>,
    /// Problem with the email field, if any.
    pub email: Option<String>,
    /// Problem with the quotation type, if any.
    pub quotation_type: Option<String>,
    /// Problem with the service description, if any.
    pub service_description: Option<String>,
}

impl FieldReport {
    /// Whether every field passed validation.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.quotation_type.is_none()
            && self.service_description.is_none()
    }
}

/// The customer-facing quote form.
///
/// Holds raw input; parsed values are derived on demand. Consent is
/// session-only and never persisted.
#[derive(Debug, Clone)]
pub struct QuoteForm {
    name: String,
    country_code: CountryCode,
    phone_digits: String,
    email: String,
    quotation_type: Option<QuotationType>,
    service_description: String,
    consent: bool,
}

impl Default for QuoteForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            country_code: CountryCode::default(),
            phone_digits: String::new(),
            email: String::new(),
            quotation_type: None,
            service_description: String::new(),
            consent: false,
        }
    }
}

impl QuoteForm {
    /// Create an empty form with the default country code.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Set the customer name.
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
        self.refresh_consent();
    }

    /// Switch the phone country code.
    ///
    /// The national number is cleared: its length requirement just changed,
    /// so the old digits are meaningless under the new code.
    pub fn set_country_code(&mut self, code: CountryCode) {
        if code != self.country_code {
            self.country_code = code;
            self.phone_digits.clear();
        }
        self.refresh_consent();
    }

    /// Set the national phone number from raw input.
    ///
    /// Non-digits are stripped and the result truncated to the country's
    /// required length, so the field can never hold more digits than valid.
    pub fn set_phone(&mut self, raw: &str) {
        let digits = sanitize_digits(raw);
        let max = self.country_code.required_digits();
        self.phone_digits = digits.chars().take(max).collect();
        self.refresh_consent();
    }

    /// Set the email field. Empty input means "no email".
    pub fn set_email(&mut self, raw: &str) {
        self.email = raw.trim().to_owned();
        self.refresh_consent();
    }

    /// Choose the quotation type.
    pub fn set_quotation_type(&mut self, quotation_type: QuotationType) {
        self.quotation_type = Some(quotation_type);
        self.refresh_consent();
    }

    /// Set the service description.
    pub fn set_service_description(&mut self, raw: &str) {
        self.service_description = raw.to_owned();
        self.refresh_consent();
    }

    /// Set the consent checkbox.
    ///
    /// Granting consent is a no-op while the checkbox is disabled (fields
    /// invalid); revoking it always works.
    pub fn set_consent(&mut self, granted: bool) {
        if granted && !self.consent_enabled() {
            return;
        }
        self.consent = granted;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current country code.
    #[must_use]
    pub const fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    /// National phone digits as currently held.
    #[must_use]
    pub fn phone_digits(&self) -> &str {
        &self.phone_digits
    }

    /// Maximum digits the phone field accepts under the current code.
    #[must_use]
    pub fn max_phone_len(&self) -> usize {
        self.country_code.required_digits()
    }

    /// Selected quotation type, if any.
    #[must_use]
    pub const fn quotation_type(&self) -> Option<QuotationType> {
        self.quotation_type
    }

    /// Whether consent is currently granted.
    #[must_use]
    pub const fn consent(&self) -> bool {
        self.consent
    }

    // =========================================================================
    // Validation & gating
    // =========================================================================

    /// Validate every field and report per-field problems.
    #[must_use]
    pub fn validate(&self) -> FieldReport {
        let mut report = FieldReport::default();

        if self.name.trim().is_empty() {
            report.name = Some("Name is required".to_owned());
        }

        if self.phone_digits.is_empty() {
            report.phone = Some("Phone number is required".to_owned());
        } else if let Err(e) = self.parse_phone() {
            report.phone = Some(match e {
                PhoneError::WrongLength { required, got, .. } => {
                    format!("Phone number must have {required} digits (got {got})")
                }
                PhoneError::BadCountryCode => "Calling code is not valid".to_owned(),
            });
        }

        if !self.email.is_empty()
            && let Err(e) = Email::parse(&self.email)
        {
            report.email = Some(match e {
                EmailError::TooLong { .. } => "Email address is too long".to_owned(),
                _ => "Email address is not valid".to_owned(),
            });
        }

        match self.quotation_type {
            None => {
                report.quotation_type = Some("Choose a quotation type".to_owned());
            }
            Some(t) if t.requires_description() => {
                let len = self.service_description.trim().chars().count();
                if len < MIN_DESCRIPTION_LEN {
                    report.service_description = Some(format!(
                        "Describe the service needed (at least {MIN_DESCRIPTION_LEN} characters)"
                    ));
                }
            }
            Some(_) => {}
        }

        report
    }

    /// Whether the consent checkbox is enabled.
    ///
    /// True exactly when every required field validates.
    #[must_use]
    pub fn consent_enabled(&self) -> bool {
        self.validate().is_clean()
    }

    /// Whether the submit action is enabled.
    ///
    /// Requires valid fields and granted consent.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.consent && self.consent_enabled()
    }

    /// Build the wire request from the form and the current cart entries.
    ///
    /// Callers check [`Self::submit_enabled`] first; this does not re-gate.
    #[must_use]
    pub fn build_request(&self, entries: &[CartEntry], recipients: &[Email]) -> QuoteRequest {
        let items = entries
            .iter()
            .map(|entry| QuoteItem {
                product_id: entry.product.id.clone(),
                product_name: entry.product.name.clone(),
                brand: entry.product.brand.clone(),
                purpose: entry.product.purpose.clone(),
                quantity: entry.quantity,
            })
            .collect();

        let description = self.service_description.trim();
        QuoteRequest {
            items,
            customer_name: self.name.trim().to_owned(),
            customer_phone: self.customer_phone().map_or_else(String::new, |p| p.to_string()),
            customer_email: self.customer_email(),
            quotation_type: self.quotation_type.unwrap_or(QuotationType::Purchase),
            service_description: (!description.is_empty()).then(|| description.to_owned()),
            recipient_addresses: recipients.to_vec(),
        }
    }

    /// The validated phone number, when the field currently parses.
    #[must_use]
    pub fn customer_phone(&self) -> Option<PhoneNumber> {
        self.parse_phone().ok()
    }

    /// The validated email, when one was provided and parses.
    #[must_use]
    pub fn customer_email(&self) -> Option<Email> {
        if self.email.is_empty() {
            return None;
        }
        Email::parse(&self.email).ok()
    }

    fn parse_phone(&self) -> Result<PhoneNumber, PhoneError> {
        PhoneNumber::parse(self.country_code.clone(), &self.phone_digits)
    }

    /// Revoke consent whenever the fields stop validating.
    fn refresh_consent(&mut self) {
        if self.consent && !self.consent_enabled() {
            self.consent = false;
        }
    }
}
