//! Paddock management service

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{AssessmentRepository, LocationRepository};
use shared::models::{Assessment, AssessmentStatus, Location, LocationStatus};
use shared::types::GpsCoordinates;
use shared::validation::{validate_area_ha, validate_name};

/// Paddock service
#[derive(Clone)]
pub struct LocationService {
    locations: Arc<dyn LocationRepository>,
    assessments: Arc<dyn AssessmentRepository>,
}

/// A paddock together with its in-progress draft, if requested
#[derive(Debug, Clone, Serialize)]
pub struct LocationOverview {
    #[serde(flatten)]
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_assessment: Option<Assessment>,
}

/// Input for creating a paddock
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLocationInput {
    pub user_id: Uuid,
    pub name: String,
    pub area_ha: Decimal,
    pub coordinates: Option<GpsCoordinates>,
}

/// Input for updating a paddock
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocationInput {
    pub name: Option<String>,
    pub area_ha: Option<Decimal>,
    pub coordinates: Option<GpsCoordinates>,
}

impl LocationService {
    pub fn new(
        locations: Arc<dyn LocationRepository>,
        assessments: Arc<dyn AssessmentRepository>,
    ) -> Self {
        Self {
            locations,
            assessments,
        }
    }

    /// List paddocks, optionally scoped to one user, optionally annotated
    /// with the draft assessment in progress on each.
    pub async fn list(
        &self,
        user_id: Option<Uuid>,
        with_status: bool,
    ) -> AppResult<Vec<LocationOverview>> {
        let mut locations = self.locations.list().await?;
        if let Some(user_id) = user_id {
            locations.retain(|l| l.user_id == user_id);
        }
        locations.sort_by(|a, b| a.name.cmp(&b.name));

        let mut overviews = Vec::with_capacity(locations.len());
        for location in locations {
            let draft_assessment = match (with_status, location.assessment_id) {
                (true, Some(assessment_id)) => self
                    .assessments
                    .find_by_id(assessment_id)
                    .await?
                    .filter(|a| a.status == AssessmentStatus::Draft),
                _ => None,
            };
            overviews.push(LocationOverview {
                location,
                draft_assessment,
            });
        }
        Ok(overviews)
    }

    /// Get a paddock by id
    pub async fn get(&self, id: Uuid) -> AppResult<Location> {
        self.locations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location".to_string()))
    }

    /// Create a paddock
    pub async fn create(&self, input: CreateLocationInput) -> AppResult<Location> {
        validate_name(&input.name)
            .map_err(|message| AppError::validation("name", message))?;
        validate_area_ha(input.area_ha)
            .map_err(|message| AppError::validation("area_ha", message))?;

        let now = Utc::now();
        let location = Location {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            name: input.name.trim().to_string(),
            area_ha: input.area_ha,
            status: LocationStatus::NotStarted,
            coordinates: input.coordinates,
            assessment_id: None,
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(paddock = %location.name, "creating paddock");
        self.locations.insert(location).await
    }

    /// Update a paddock
    pub async fn update(&self, id: Uuid, input: UpdateLocationInput) -> AppResult<Location> {
        let mut location = self.get(id).await?;

        if let Some(ref name) = input.name {
            validate_name(name).map_err(|message| AppError::validation("name", message))?;
            location.name = name.trim().to_string();
        }
        if let Some(area_ha) = input.area_ha {
            validate_area_ha(area_ha)
                .map_err(|message| AppError::validation("area_ha", message))?;
            location.area_ha = area_ha;
        }
        if let Some(coordinates) = input.coordinates {
            location.coordinates = Some(coordinates);
        }
        location.updated_at = Utc::now();

        self.locations.update(location).await
    }

    /// Delete a paddock. Fails while any assessment references it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        // Ensure it exists first so a missing paddock reports not-found
        self.get(id).await?;

        let referencing = self.assessments.find_by_location(id).await?;
        if !referencing.is_empty() {
            return Err(AppError::LocationInUse);
        }

        self.locations.delete(id).await
    }
}
