//! The typed assessment draft threaded through the wizard
//!
//! Each step merges its validated values into a new draft value rather
//! than mutating a shared bag, so partially-completed state is explicit
//! and easy to persist or test.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::services::assessments::CreateAssessmentInput;
use shared::estimation::{estimate_yield, FeedAssumptions, YieldEstimate};
use shared::models::{AssessmentStatus, PlantMeasurement, ReportType, SampleArea};

use super::steps::{CropDetailsForm, CultivarChoice, FieldSetupForm};

/// Accumulated wizard state
#[derive(Debug, Clone, Default)]
pub struct AssessmentDraft {
    pub crop: Option<CropDetailsForm>,
    pub field: Option<FieldSetupForm>,
    pub measurements: Vec<PlantMeasurement>,
    pub sample_areas: Vec<SampleArea>,
    pub report_type: Option<ReportType>,
    /// Non-functional graph preview toggle carried for the review screen
    pub show_graph_preview: bool,
}

impl AssessmentDraft {
    pub fn with_crop_details(mut self, crop: CropDetailsForm) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn with_field_setup(mut self, field: FieldSetupForm) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_measurement(mut self, measurement: PlantMeasurement) -> Self {
        self.measurements.push(measurement);
        self
    }

    pub fn with_sample_area(mut self, sample: SampleArea) -> Self {
        self.sample_areas.push(sample);
        self
    }

    pub fn with_report_type(mut self, report_type: ReportType) -> Self {
        self.report_type = Some(report_type);
        self
    }

    pub fn with_graph_preview(mut self, show: bool) -> Self {
        self.show_graph_preview = show;
        self
    }

    /// Yield estimate over the current samples, or `None` before field
    /// setup or while no valid sample exists.
    pub fn estimate(
        &self,
        field_area_ha: f64,
        assumptions: &FeedAssumptions,
    ) -> Option<YieldEstimate> {
        let field = self.field.as_ref()?;
        estimate_yield(
            &self.sample_areas,
            field.row_spacing_m,
            field_area_ha,
            assumptions,
        )
    }

    /// Assemble the persistence input once the wizard reaches its terminal
    /// actions. Fails if a step was skipped, which the wizard prevents.
    pub fn to_create_input(
        &self,
        status: AssessmentStatus,
        field_area_ha: f64,
        assumptions: &FeedAssumptions,
        today: NaiveDate,
    ) -> AppResult<CreateAssessmentInput> {
        let crop = self
            .crop
            .as_ref()
            .ok_or_else(|| AppError::Internal("crop details step incomplete".to_string()))?;
        let field = self
            .field
            .as_ref()
            .ok_or_else(|| AppError::Internal("field setup step incomplete".to_string()))?;
        let location_id = crop
            .location_id
            .ok_or_else(|| AppError::Internal("draft is missing its paddock".to_string()))?;
        let crop_type_id = crop
            .crop_type_id
            .ok_or_else(|| AppError::Internal("draft is missing its crop type".to_string()))?;

        let (cultivar_id, custom_cultivar_name) = match crop.cultivar {
            CultivarChoice::Listed(id) => (Some(id), None),
            CultivarChoice::Other => (None, Some(crop.custom_cultivar_name.trim().to_string())),
            CultivarChoice::Unselected => (None, None),
        };

        let estimate = self.estimate(field_area_ha, assumptions);

        Ok(CreateAssessmentInput {
            location_id,
            crop_type_id,
            cultivar_id,
            custom_cultivar_name,
            status: Some(status),
            date: Some(today),
            assessment_date: crop.assessment_date,
            sowing_date: crop.sowing_date,
            water_type: crop.water_type,
            row_spacing_m: field.row_spacing_m,
            measurement_length_m: field.measurement_length_m,
            estimated_growing_cost: crop.estimated_growing_cost,
            measurements: self.measurements.clone(),
            sample_areas: self.sample_areas.clone(),
            dry_matter_percent: estimate.map(|e| e.dry_matter_percent),
            estimated_yield_t_ha: estimate.map(|e| e.yield_t_ha),
            total_yield_t: estimate.map(|e| e.total_yield_t),
            feeding_capacity_days: estimate.map(|e| e.feeding_days),
            stock_count: Some(assumptions.herd_size as i32),
        })
    }
}
