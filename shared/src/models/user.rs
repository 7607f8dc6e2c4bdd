//! User and customer-relationship models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of account a user signs in with
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Farmer,
    Retailer,
    Admin,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountType::Farmer => write!(f, "Farmer"),
            AccountType::Retailer => write!(f, "Retailer"),
            AccountType::Admin => write!(f, "Admin"),
        }
    }
}

/// A user account. Farmers own paddocks directly; retailers reach farmer
/// data through [`CustomerRelationship`] records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// bcrypt hash; absent for accounts that only sign in by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub has_password: bool,
    pub role: String,
    pub account_type: AccountType,
    pub created_at: DateTime<Utc>,
}

/// State of a retailer-customer link
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Active,
    Inactive,
}

/// A retailer-side join granting a retailer visibility into a farmer's
/// paddocks and assessments without owning them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRelationship {
    pub id: Uuid,
    pub retailer_id: Uuid,
    pub customer_id: Uuid,
    pub relationship_start: NaiveDate,
    pub status: RelationshipStatus,
}
