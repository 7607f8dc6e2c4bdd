//! In-memory implementation of the repository interfaces
//!
//! Holds every entity in plain vectors behind a single `RwLock` and awaits
//! a simulated network delay before each operation, mimicking the latency
//! of the real backend the app would eventually talk to.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{
    Assessment, CropType, Cultivar, CustomerRelationship, Location, Report, User,
};

use super::{
    AssessmentRepository, CropTypeRepository, CultivarRepository, LocationRepository,
    RelationshipRepository, ReportRepository, UserRepository, VerificationCode,
    VerificationCodeRepository,
};

/// Simulated network delay window
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms,
        }
    }

    /// No delay; used by tests
    pub fn none() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    async fn simulate(&self) {
        if self.max_ms == 0 {
            return;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(300, 800)
    }
}

/// All mock state, process-wide
#[derive(Debug, Default)]
pub(crate) struct StoreData {
    pub locations: Vec<Location>,
    pub cultivars: Vec<Cultivar>,
    pub crop_types: Vec<CropType>,
    pub assessments: Vec<Assessment>,
    pub reports: Vec<Report>,
    pub users: Vec<User>,
    pub relationships: Vec<CustomerRelationship>,
    pub verification_codes: Vec<VerificationCode>,
}

/// The mock data provider backing every service
pub struct MemoryStore {
    data: RwLock<StoreData>,
    latency: Latency,
}

impl MemoryStore {
    /// An empty store
    pub fn new(latency: Latency) -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
            latency,
        }
    }

    /// A store pre-populated with the demo dataset
    pub fn seeded(latency: Latency) -> Self {
        Self {
            data: RwLock::new(super::seed::demo_data()),
            latency,
        }
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Location>> {
        self.latency.simulate().await;
        Ok(self.data.read().await.locations.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Location>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data.locations.iter().find(|l| l.id == id).cloned())
    }

    async fn insert(&self, location: Location) -> AppResult<Location> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.locations.push(location.clone());
        Ok(location)
    }

    async fn update(&self, location: Location) -> AppResult<Location> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        let slot = data
            .locations
            .iter_mut()
            .find(|l| l.id == location.id)
            .ok_or_else(|| AppError::NotFound("Location".to_string()))?;
        *slot = location.clone();
        Ok(location)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        let before = data.locations.len();
        data.locations.retain(|l| l.id != id);
        if data.locations.len() == before {
            return Err(AppError::NotFound("Location".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CultivarRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Cultivar>> {
        self.latency.simulate().await;
        Ok(self.data.read().await.cultivars.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Cultivar>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data.cultivars.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, cultivar: Cultivar) -> AppResult<Cultivar> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.cultivars.push(cultivar.clone());
        Ok(cultivar)
    }
}

#[async_trait]
impl CropTypeRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<CropType>> {
        self.latency.simulate().await;
        Ok(self.data.read().await.crop_types.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CropType>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data.crop_types.iter().find(|c| c.id == id).cloned())
    }
}

#[async_trait]
impl AssessmentRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Assessment>> {
        self.latency.simulate().await;
        Ok(self.data.read().await.assessments.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Assessment>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data.assessments.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_location(&self, location_id: Uuid) -> AppResult<Vec<Assessment>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data
            .assessments
            .iter()
            .filter(|a| a.location_id == location_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, assessment: Assessment) -> AppResult<Assessment> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.assessments.push(assessment.clone());
        Ok(assessment)
    }

    async fn update(&self, assessment: Assessment) -> AppResult<Assessment> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        let slot = data
            .assessments
            .iter_mut()
            .find(|a| a.id == assessment.id)
            .ok_or_else(|| AppError::NotFound("Assessment".to_string()))?;
        *slot = assessment.clone();
        Ok(assessment)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        let before = data.assessments.len();
        data.assessments.retain(|a| a.id != id);
        if data.assessments.len() == before {
            return Err(AppError::NotFound("Assessment".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Report>> {
        self.latency.simulate().await;
        Ok(self.data.read().await.reports.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Report>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data.reports.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, report: Report) -> AppResult<Report> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.reports.push(report.clone());
        Ok(report)
    }

    async fn update(&self, report: Report) -> AppResult<Report> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        let slot = data
            .reports
            .iter_mut()
            .find(|r| r.id == report.id)
            .ok_or_else(|| AppError::NotFound("Report".to_string()))?;
        *slot = report.clone();
        Ok(report)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        self.latency.simulate().await;
        Ok(self.data.read().await.users.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RelationshipRepository for MemoryStore {
    async fn list_by_retailer(&self, retailer_id: Uuid) -> AppResult<Vec<CustomerRelationship>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data
            .relationships
            .iter()
            .filter(|r| r.retailer_id == retailer_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        retailer_id: Uuid,
        customer_id: Uuid,
    ) -> AppResult<Option<CustomerRelationship>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data
            .relationships
            .iter()
            .find(|r| r.retailer_id == retailer_id && r.customer_id == customer_id)
            .cloned())
    }

    async fn insert(&self, relationship: CustomerRelationship) -> AppResult<CustomerRelationship> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.relationships.push(relationship.clone());
        Ok(relationship)
    }
}

#[async_trait]
impl VerificationCodeRepository for MemoryStore {
    async fn find(&self, email: &str) -> AppResult<Option<VerificationCode>> {
        self.latency.simulate().await;
        let data = self.data.read().await;
        Ok(data
            .verification_codes
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn upsert(&self, code: VerificationCode) -> AppResult<()> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.verification_codes
            .retain(|c| !c.email.eq_ignore_ascii_case(&code.email));
        data.verification_codes.push(code);
        Ok(())
    }

    async fn remove(&self, email: &str) -> AppResult<()> {
        self.latency.simulate().await;
        let mut data = self.data.write().await;
        data.verification_codes
            .retain(|c| !c.email.eq_ignore_ascii_case(email));
        Ok(())
    }
}
