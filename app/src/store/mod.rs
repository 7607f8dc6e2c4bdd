//! Mock data provider
//!
//! Repository interfaces, one per entity type, with async signatures shaped
//! like a REST client. The only implementation is the in-memory
//! [`MemoryStore`], which simulates network latency; a real backend would
//! swap in database-backed implementations without touching the services.

mod memory;
mod seed;

pub use memory::{Latency, MemoryStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppResult;
use shared::models::{
    Assessment, CropType, Cultivar, CustomerRelationship, Location, Report, User,
};

/// Paddock persistence
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Location>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Location>>;
    async fn insert(&self, location: Location) -> AppResult<Location>;
    async fn update(&self, location: Location) -> AppResult<Location>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Cultivar reference data
#[async_trait]
pub trait CultivarRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Cultivar>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Cultivar>>;
    async fn insert(&self, cultivar: Cultivar) -> AppResult<Cultivar>;
}

/// Crop type reference data
#[async_trait]
pub trait CropTypeRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<CropType>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CropType>>;
}

/// Assessment persistence
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Assessment>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Assessment>>;
    async fn find_by_location(&self, location_id: Uuid) -> AppResult<Vec<Assessment>>;
    async fn insert(&self, assessment: Assessment) -> AppResult<Assessment>;
    async fn update(&self, assessment: Assessment) -> AppResult<Assessment>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Report persistence
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Report>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Report>>;
    async fn insert(&self, report: Report) -> AppResult<Report>;
    async fn update(&self, report: Report) -> AppResult<Report>;
}

/// User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<User>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn insert(&self, user: User) -> AppResult<User>;
}

/// Retailer-customer links
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<CustomerRelationship>>;
    async fn find(&self, retailer_id: Uuid, customer_id: Uuid)
        -> AppResult<Option<CustomerRelationship>>;
    async fn insert(&self, relationship: CustomerRelationship)
        -> AppResult<CustomerRelationship>;
}

/// A pending sign-in verification code. Single-use: removed on success,
/// expiry, or attempt exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub attempts: u32,
}

/// Pending verification codes, at most one per email
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    async fn find(&self, email: &str) -> AppResult<Option<VerificationCode>>;
    /// Insert or replace the code for an email
    async fn upsert(&self, code: VerificationCode) -> AppResult<()>;
    async fn remove(&self, email: &str) -> AppResult<()>;
}
