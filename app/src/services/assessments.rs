//! Assessment service — the transactional heart of the app
//!
//! Maintains the two invariants the rest of the system leans on: an
//! assessment always references an existing paddock, and a paddock carries
//! at most one draft at a time (tracked through `location.assessment_id`).

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{
    AssessmentRepository, CropTypeRepository, CultivarRepository, LocationRepository,
};
use shared::models::{
    Assessment, AssessmentStatus, LocationStatus, PlantMeasurement, SampleArea, WaterType,
};

/// Assessment service
#[derive(Clone)]
pub struct AssessmentService {
    assessments: Arc<dyn AssessmentRepository>,
    locations: Arc<dyn LocationRepository>,
    cultivars: Arc<dyn CultivarRepository>,
    crop_types: Arc<dyn CropTypeRepository>,
}

/// Input for creating an assessment.
///
/// `status` defaults to completed and `date` to today, matching the data
/// provider's contract; the wizard passes both explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssessmentInput {
    pub location_id: Uuid,
    pub crop_type_id: Uuid,
    pub cultivar_id: Option<Uuid>,
    pub custom_cultivar_name: Option<String>,
    pub status: Option<AssessmentStatus>,
    pub date: Option<NaiveDate>,
    pub assessment_date: NaiveDate,
    pub sowing_date: NaiveDate,
    pub water_type: WaterType,
    pub row_spacing_m: f64,
    pub measurement_length_m: f64,
    pub estimated_growing_cost: Decimal,
    pub measurements: Vec<PlantMeasurement>,
    pub sample_areas: Vec<SampleArea>,
    pub dry_matter_percent: Option<f64>,
    pub estimated_yield_t_ha: Option<f64>,
    pub total_yield_t: Option<f64>,
    pub feeding_capacity_days: Option<i64>,
    pub stock_count: Option<i32>,
}

/// Input for updating an assessment; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssessmentInput {
    pub cultivar_id: Option<Uuid>,
    pub custom_cultivar_name: Option<String>,
    pub status: Option<AssessmentStatus>,
    pub assessment_date: Option<NaiveDate>,
    pub sowing_date: Option<NaiveDate>,
    pub water_type: Option<WaterType>,
    pub row_spacing_m: Option<f64>,
    pub measurement_length_m: Option<f64>,
    pub estimated_growing_cost: Option<Decimal>,
    pub measurements: Option<Vec<PlantMeasurement>>,
    pub sample_areas: Option<Vec<SampleArea>>,
    pub dry_matter_percent: Option<f64>,
    pub estimated_yield_t_ha: Option<f64>,
    pub total_yield_t: Option<f64>,
    pub feeding_capacity_days: Option<i64>,
    pub stock_count: Option<i32>,
}

/// An assessment joined with display names for the list and detail screens
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentDetail {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub location_name: String,
    pub crop_type_name: String,
    pub cultivar_name: String,
}

impl AssessmentService {
    pub fn new(
        assessments: Arc<dyn AssessmentRepository>,
        locations: Arc<dyn LocationRepository>,
        cultivars: Arc<dyn CultivarRepository>,
        crop_types: Arc<dyn CropTypeRepository>,
    ) -> Self {
        Self {
            assessments,
            locations,
            cultivars,
            crop_types,
        }
    }

    /// List assessments, optionally scoped to paddocks owned by a user
    pub async fn list(&self, user_id: Option<Uuid>) -> AppResult<Vec<Assessment>> {
        let mut assessments = self.assessments.list().await?;
        if let Some(user_id) = user_id {
            let owned: Vec<Uuid> = self
                .locations
                .list()
                .await?
                .into_iter()
                .filter(|l| l.user_id == user_id)
                .map(|l| l.id)
                .collect();
            assessments.retain(|a| owned.contains(&a.location_id));
        }
        assessments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(assessments)
    }

    /// List completed assessments
    pub async fn list_completed(&self, user_id: Option<Uuid>) -> AppResult<Vec<Assessment>> {
        let mut assessments = self.list(user_id).await?;
        assessments.retain(|a| a.status == AssessmentStatus::Completed);
        Ok(assessments)
    }

    /// List draft assessments
    pub async fn list_drafts(&self, user_id: Option<Uuid>) -> AppResult<Vec<Assessment>> {
        let mut assessments = self.list(user_id).await?;
        assessments.retain(|a| a.status == AssessmentStatus::Draft);
        Ok(assessments)
    }

    /// Get an assessment with joined display names
    pub async fn get(&self, id: Uuid) -> AppResult<AssessmentDetail> {
        let assessment = self
            .assessments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assessment".to_string()))?;

        let location_name = self
            .locations
            .find_by_id(assessment.location_id)
            .await?
            .map(|l| l.name)
            .unwrap_or_else(|| "Unknown paddock".to_string());
        let crop_type_name = self
            .crop_types
            .find_by_id(assessment.crop_type_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| "Unknown crop".to_string());
        let cultivar_name = match (assessment.cultivar_id, &assessment.custom_cultivar_name) {
            (Some(cultivar_id), _) => self
                .cultivars
                .find_by_id(cultivar_id)
                .await?
                .map(|c| c.name)
                .unwrap_or_else(|| "Unknown cultivar".to_string()),
            (None, Some(custom)) => custom.clone(),
            (None, None) => "Unspecified".to_string(),
        };

        Ok(AssessmentDetail {
            assessment,
            location_name,
            crop_type_name,
            cultivar_name,
        })
    }

    /// Create an assessment, updating the paddock's draft pointer when the
    /// new record is a draft.
    pub async fn create(&self, input: CreateAssessmentInput) -> AppResult<Assessment> {
        let mut location = self
            .locations
            .find_by_id(input.location_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Location".to_string()))?;

        let status = input.status.unwrap_or(AssessmentStatus::Completed);
        if status == AssessmentStatus::Draft && location.assessment_id.is_some() {
            return Err(AppError::Conflict {
                resource: "assessment".to_string(),
                message: "This paddock already has a draft assessment in progress".to_string(),
            });
        }

        let now = Utc::now();
        let assessment = Assessment {
            id: Uuid::new_v4(),
            location_id: input.location_id,
            crop_type_id: input.crop_type_id,
            cultivar_id: input.cultivar_id,
            custom_cultivar_name: input.custom_cultivar_name,
            date: input.date.unwrap_or_else(|| now.date_naive()),
            assessment_date: input.assessment_date,
            sowing_date: input.sowing_date,
            status,
            water_type: input.water_type,
            row_spacing_m: input.row_spacing_m,
            measurement_length_m: input.measurement_length_m,
            estimated_growing_cost: input.estimated_growing_cost,
            measurements: input.measurements,
            sample_areas: input.sample_areas,
            dry_matter_percent: input.dry_matter_percent,
            estimated_yield_t_ha: input.estimated_yield_t_ha,
            total_yield_t: input.total_yield_t,
            feeding_capacity_days: input.feeding_capacity_days,
            stock_count: input.stock_count,
            created_at: now,
            updated_at: now,
        };

        let assessment = self.assessments.insert(assessment).await?;
        tracing::info!(
            assessment = %assessment.id,
            paddock = %location.name,
            status = %assessment.status,
            "assessment created"
        );

        match status {
            AssessmentStatus::Draft => {
                location.assessment_id = Some(assessment.id);
                location.status = LocationStatus::Draft;
            }
            AssessmentStatus::Completed => {
                location.assessment_id = None;
                location.status = LocationStatus::NotStarted;
            }
        }
        location.updated_at = now;
        self.locations.update(location).await?;

        Ok(assessment)
    }

    /// Update an assessment. Completed assessments never return to draft.
    pub async fn update(&self, id: Uuid, input: UpdateAssessmentInput) -> AppResult<Assessment> {
        let mut assessment = self
            .assessments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assessment".to_string()))?;

        if let Some(status) = input.status {
            if assessment.status == AssessmentStatus::Completed
                && status == AssessmentStatus::Draft
            {
                return Err(AppError::InvalidStateTransition(
                    "a completed assessment cannot return to draft".to_string(),
                ));
            }
            if assessment.status == AssessmentStatus::Draft
                && status == AssessmentStatus::Completed
            {
                self.clear_draft_pointer(&assessment).await?;
            }
            assessment.status = status;
        }

        if let Some(cultivar_id) = input.cultivar_id {
            assessment.cultivar_id = Some(cultivar_id);
            assessment.custom_cultivar_name = None;
        } else if let Some(custom) = input.custom_cultivar_name {
            assessment.custom_cultivar_name = Some(custom);
            assessment.cultivar_id = None;
        }
        if let Some(assessment_date) = input.assessment_date {
            assessment.assessment_date = assessment_date;
        }
        if let Some(sowing_date) = input.sowing_date {
            assessment.sowing_date = sowing_date;
        }
        if let Some(water_type) = input.water_type {
            assessment.water_type = water_type;
        }
        if let Some(row_spacing_m) = input.row_spacing_m {
            assessment.row_spacing_m = row_spacing_m;
        }
        if let Some(measurement_length_m) = input.measurement_length_m {
            assessment.measurement_length_m = measurement_length_m;
        }
        if let Some(cost) = input.estimated_growing_cost {
            assessment.estimated_growing_cost = cost;
        }
        if let Some(measurements) = input.measurements {
            assessment.measurements = measurements;
        }
        if let Some(sample_areas) = input.sample_areas {
            assessment.sample_areas = sample_areas;
        }
        if let Some(dm) = input.dry_matter_percent {
            assessment.dry_matter_percent = Some(dm);
        }
        if let Some(estimated) = input.estimated_yield_t_ha {
            assessment.estimated_yield_t_ha = Some(estimated);
        }
        if let Some(total) = input.total_yield_t {
            assessment.total_yield_t = Some(total);
        }
        if let Some(days) = input.feeding_capacity_days {
            assessment.feeding_capacity_days = Some(days);
        }
        if let Some(stock_count) = input.stock_count {
            assessment.stock_count = Some(stock_count);
        }
        assessment.updated_at = Utc::now();

        self.assessments.update(assessment).await
    }

    /// Delete an assessment, releasing the paddock's draft pointer if this
    /// was the draft in progress.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let assessment = self
            .assessments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assessment".to_string()))?;

        self.assessments.delete(id).await?;
        self.clear_draft_pointer(&assessment).await?;
        Ok(())
    }

    async fn clear_draft_pointer(&self, assessment: &Assessment) -> AppResult<()> {
        if let Some(mut location) = self.locations.find_by_id(assessment.location_id).await? {
            if location.assessment_id == Some(assessment.id) {
                location.assessment_id = None;
                location.status = LocationStatus::NotStarted;
                location.updated_at = Utc::now();
                self.locations.update(location).await?;
            }
        }
        Ok(())
    }
}
