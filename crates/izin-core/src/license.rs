//! Business-license domain types.
//!
//! The licensing records are the one dependent resource family the client
//! exposes; they exercise the authenticated call pipeline end to end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of business license being applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseKind {
    BusinessRegistration,
    TradePermit,
    FoodProduction,
    Halal,
}

impl fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LicenseKind::BusinessRegistration => write!(f, "business_registration"),
            LicenseKind::TradePermit => write!(f, "trade_permit"),
            LicenseKind::FoodProduction => write!(f, "food_production"),
            LicenseKind::Halal => write!(f, "halal"),
        }
    }
}

/// Review status of a license application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Submitted,
    InReview,
    Approved,
    Rejected,
}

/// A license record, keyed by the owning user's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub owner_id: String,
    pub kind: LicenseKind,
    pub business_name: String,
    pub status: LicenseStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for creating a new license application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseApplication {
    pub kind: LicenseKind,
    pub business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_status_use_snake_case() {
        assert_eq!(
            serde_json::to_string(&LicenseKind::TradePermit).unwrap(),
            "\"trade_permit\""
        );
        assert_eq!(
            serde_json::to_string(&LicenseStatus::InReview).unwrap(),
            "\"in_review\""
        );
    }
}
