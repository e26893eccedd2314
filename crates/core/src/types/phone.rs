//! Phone number type with per-country length validation.
//!
//! The quote form collects a calling code and a national number separately.
//! Each supported calling code maps to an exact required digit count; codes
//! outside the table fall back to [`CountryCode::DEFAULT_DIGITS`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// Calling-code -> required national digit count.
///
/// Mexico, USA/Canada, Argentina, Colombia, Spain, Brazil, Chile, Bolivia,
/// Panama, Ecuador.
const PHONE_LENGTHS: &[(&str, usize)] = &[
    ("52", 10),
    ("1", 10),
    ("54", 10),
    ("57", 10),
    ("34", 9),
    ("55", 11),
    ("56", 9),
    ("591", 8),
    ("507", 8),
    ("593", 9),
];

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The calling code is empty or not numeric.
    #[error("calling code must be numeric and non-empty")]
    BadCountryCode,
    /// The national number has the wrong number of digits.
    #[error("phone number for +{code} must have exactly {required} digits (got {got})")]
    WrongLength {
        /// Calling code the number was validated against.
        code: String,
        /// Digit count required for that code.
        required: usize,
        /// Digit count actually provided.
        got: usize,
    },
}

/// An international calling code (e.g. `52` for Mexico).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    /// Required digit count for calling codes not in the lookup table.
    pub const DEFAULT_DIGITS: usize = 10;

    /// Parse a calling code from a string of digits.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::BadCountryCode`] if the input is empty or
    /// contains non-digit characters.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PhoneError::BadCountryCode);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the calling code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of national digits a phone number with this code must have.
    ///
    /// Unmapped codes fall back to [`Self::DEFAULT_DIGITS`].
    #[must_use]
    pub fn required_digits(&self) -> usize {
        PHONE_LENGTHS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map_or(Self::DEFAULT_DIGITS, |(_, len)| *len)
    }
}

impl Default for CountryCode {
    /// The form defaults to Mexico (+52).
    fn default() -> Self {
        Self("52".to_owned())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.0)
    }
}

/// A validated phone number: calling code plus national digits.
///
/// Serializes as the display form (`+52 5512345678`), which is the shape the
/// quote collaborator expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    code: CountryCode,
    digits: String,
}

impl PhoneNumber {
    /// Build a phone number from a calling code and a national number.
    ///
    /// Non-digit characters in `national` are stripped before validation, so
    /// `"55 1234-5678"` and `"5512345678"` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneError::WrongLength`] if the digit count does not match
    /// the code's required length.
    pub fn parse(code: CountryCode, national: &str) -> Result<Self, PhoneError> {
        let digits = sanitize_digits(national);
        let required = code.required_digits();
        if digits.len() != required {
            return Err(PhoneError::WrongLength {
                code: code.as_str().to_owned(),
                required,
                got: digits.len(),
            });
        }
        Ok(Self { code, digits })
    }

    /// The calling code part.
    #[must_use]
    pub const fn code(&self) -> &CountryCode {
        &self.code
    }

    /// The national digits part.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.digits)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Strip everything except ASCII digits from an input string.
///
/// Mirrors the phone field's input filter: users may paste numbers with
/// spaces, dashes, or parentheses.
#[must_use]
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_digits_mapped() {
        assert_eq!(CountryCode::parse("52").unwrap().required_digits(), 10);
        assert_eq!(CountryCode::parse("34").unwrap().required_digits(), 9);
        assert_eq!(CountryCode::parse("55").unwrap().required_digits(), 11);
        assert_eq!(CountryCode::parse("591").unwrap().required_digits(), 8);
    }

    #[test]
    fn test_required_digits_unmapped_falls_back() {
        assert_eq!(
            CountryCode::parse("44").unwrap().required_digits(),
            CountryCode::DEFAULT_DIGITS
        );
    }

    #[test]
    fn test_country_code_rejects_non_digits() {
        assert!(CountryCode::parse("").is_err());
        assert!(CountryCode::parse("+52").is_err());
        assert!(CountryCode::parse("mx").is_err());
    }

    #[test]
    fn test_parse_valid() {
        let phone = PhoneNumber::parse(CountryCode::default(), "5512345678").unwrap();
        assert_eq!(phone.to_string(), "+52 5512345678");
    }

    #[test]
    fn test_parse_strips_formatting() {
        let phone = PhoneNumber::parse(CountryCode::default(), "(55) 1234-5678").unwrap();
        assert_eq!(phone.digits(), "5512345678");
    }

    #[test]
    fn test_parse_wrong_length() {
        let err = PhoneNumber::parse(CountryCode::parse("34").unwrap(), "5512345678").unwrap_err();
        assert!(matches!(
            err,
            PhoneError::WrongLength {
                required: 9,
                got: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_serialize_display_form() {
        let phone = PhoneNumber::parse(CountryCode::default(), "5512345678").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"+52 5512345678\"");
    }

    #[test]
    fn test_sanitize_digits() {
        assert_eq!(sanitize_digits("abc 12-3(4)"), "1234");
        assert_eq!(sanitize_digits(""), "");
    }
}
