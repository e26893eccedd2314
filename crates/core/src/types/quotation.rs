//! Quotation kinds offered by the sales team.

use core::fmt;

use serde::{Deserialize, Serialize};

/// What kind of quote the customer is requesting.
///
/// `MaintenanceService` is special-cased in the quote form: it requires a
/// free-text description of the work needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotationType {
    /// Outright purchase of the carted products.
    Purchase,
    /// Equipment rental.
    Rental,
    /// On-site maintenance work; needs a service description.
    MaintenanceService,
}

impl QuotationType {
    /// Whether this quotation kind requires a service description.
    #[must_use]
    pub const fn requires_description(self) -> bool {
        matches!(self, Self::MaintenanceService)
    }

    /// Stable identifier used in config keys and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Rental => "rental",
            Self::MaintenanceService => "maintenance_service",
        }
    }

    /// All quotation kinds, in display order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Purchase, Self::Rental, Self::MaintenanceService]
    }
}

impl fmt::Display for QuotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QuotationType {
    type Err = UnknownQuotationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "purchase" => Ok(Self::Purchase),
            "rental" => Ok(Self::Rental),
            "maintenance_service" => Ok(Self::MaintenanceService),
            other => Err(UnknownQuotationType(other.to_owned())),
        }
    }
}

/// Error returned when parsing an unrecognized quotation type.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown quotation type: {0}")]
pub struct UnknownQuotationType(pub String);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_description() {
        assert!(QuotationType::MaintenanceService.requires_description());
        assert!(!QuotationType::Purchase.requires_description());
        assert!(!QuotationType::Rental.requires_description());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for kind in QuotationType::all() {
            let parsed: QuotationType = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        assert!("lease".parse::<QuotationType>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&QuotationType::MaintenanceService).unwrap();
        assert_eq!(json, "\"maintenance_service\"");
    }
}
