//! Paddock (location) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::GpsCoordinates;

/// A named, measured field area owned by a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    /// Owning farmer. For retailer-entered paddocks this is the customer.
    pub user_id: Uuid,
    pub name: String,
    pub area_ha: Decimal,
    pub status: LocationStatus,
    pub coordinates: Option<GpsCoordinates>,
    /// The draft assessment currently in progress on this paddock, if any.
    /// A paddock carries at most one draft at a time.
    pub assessment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Paddock assessment progress
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LocationStatus {
    /// An assessment draft is in progress
    Draft,
    /// No assessment has been started
    NotStarted,
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationStatus::Draft => write!(f, "Draft"),
            LocationStatus::NotStarted => write!(f, "Not started"),
        }
    }
}
