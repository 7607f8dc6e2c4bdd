//! The assessment wizard — a four-step linear flow from crop details to a
//! generated report
//!
//! Steps advance strictly one at a time with Back/Next only. Each step
//! validates its own form through the generic form state; the review step
//! derives the yield estimate and owns the three terminal actions (cancel,
//! save as draft, generate report).

mod draft;
pub mod keypad;
mod steps;

pub use draft::AssessmentDraft;
pub use keypad::{Key, KeypadError, KeypadInput};
pub use steps::{CropDetailsForm, CultivarChoice, FieldSetupForm, ValueType};

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::AppResult;
use crate::forms::FormState;
use crate::services::{AssessmentService, LocationService, ReportService};
use shared::estimation::{FeedAssumptions, YieldEstimate, YieldSummary};
use shared::models::{
    Assessment, AssessmentStatus, PlantMeasurement, Report, ReportType, SampleArea, WaterType,
};

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    CropDetails,
    FieldSetup,
    Measurements,
    Review,
}

impl WizardStep {
    pub fn next(self) -> Option<Self> {
        match self {
            WizardStep::CropDetails => Some(WizardStep::FieldSetup),
            WizardStep::FieldSetup => Some(WizardStep::Measurements),
            WizardStep::Measurements => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    pub fn back(self) -> Option<Self> {
        match self {
            WizardStep::CropDetails => None,
            WizardStep::FieldSetup => Some(WizardStep::CropDetails),
            WizardStep::Measurements => Some(WizardStep::FieldSetup),
            WizardStep::Review => Some(WizardStep::Measurements),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::CropDetails => "Crop Details",
            WizardStep::FieldSetup => "Field Setup",
            WizardStep::Measurements => "Measurements",
            WizardStep::Review => "Review",
        }
    }
}

/// Everything the review screen shows
#[derive(Debug, Clone)]
pub struct ReviewSummary {
    pub location_name: String,
    pub area_ha: Decimal,
    pub water_type: WaterType,
    pub sowing_date: NaiveDate,
    pub assessment_date: NaiveDate,
    pub sample_count: usize,
    pub estimate: Option<YieldEstimate>,
    pub display: YieldSummary,
    pub report_type: ReportType,
}

/// The four-step assessment flow
pub struct AssessmentWizard {
    step: WizardStep,
    draft: AssessmentDraft,
    locations: LocationService,
    assessments: AssessmentService,
    reports: ReportService,
    assumptions: FeedAssumptions,
    today: NaiveDate,
}

impl AssessmentWizard {
    pub fn new(
        locations: LocationService,
        assessments: AssessmentService,
        reports: ReportService,
        assumptions: FeedAssumptions,
        today: NaiveDate,
    ) -> Self {
        Self {
            step: WizardStep::CropDetails,
            draft: AssessmentDraft::default(),
            locations,
            assessments,
            reports,
            assumptions,
            today,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &AssessmentDraft {
        &self.draft
    }

    /// Step back; rejected on the first step
    pub fn back(&mut self) -> bool {
        match self.step.back() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Validate the crop-details form and advance. Returns false when the
    /// wizard is on another step or validation blocked the submit, leaving
    /// the form's errors populated.
    pub fn submit_crop_details(&mut self, form: &mut FormState<CropDetailsForm>) -> bool {
        if self.step != WizardStep::CropDetails {
            return false;
        }
        match form.validate_all() {
            Some(values) => {
                self.draft = std::mem::take(&mut self.draft).with_crop_details(values);
                self.step = WizardStep::FieldSetup;
                true
            }
            None => false,
        }
    }

    /// Validate the field-setup form and advance
    pub fn submit_field_setup(&mut self, form: &mut FormState<FieldSetupForm>) -> bool {
        if self.step != WizardStep::FieldSetup {
            return false;
        }
        match form.validate_all() {
            Some(values) => {
                self.draft = std::mem::take(&mut self.draft).with_field_setup(values);
                self.step = WizardStep::Measurements;
                true
            }
            None => false,
        }
    }

    /// Record a plant measurement row (measurements step only)
    pub fn add_measurement(&mut self, measurement: PlantMeasurement) -> bool {
        if self.step != WizardStep::Measurements {
            return false;
        }
        self.draft = std::mem::take(&mut self.draft).with_measurement(measurement);
        true
    }

    /// Record a cut sample (measurements step only)
    pub fn add_sample_area(&mut self, sample: SampleArea) -> bool {
        if self.step != WizardStep::Measurements {
            return false;
        }
        self.draft = std::mem::take(&mut self.draft).with_sample_area(sample);
        true
    }

    /// Graph preview placeholder; flips display state only
    pub fn toggle_graph_preview(&mut self) {
        let show = !self.draft.show_graph_preview;
        self.draft = std::mem::take(&mut self.draft).with_graph_preview(show);
    }

    /// Leave the measurements step for review
    pub fn finish_measurements(&mut self) -> bool {
        if self.step != WizardStep::Measurements {
            return false;
        }
        self.step = WizardStep::Review;
        true
    }

    /// Choose the report depth on the review step
    pub fn set_report_type(&mut self, report_type: ReportType) -> bool {
        if self.step != WizardStep::Review {
            return false;
        }
        self.draft = std::mem::take(&mut self.draft).with_report_type(report_type);
        true
    }

    /// Build the review screen: paddock context plus the derived yield
    /// figures (`N/A` when no valid sample was entered).
    pub async fn review(&self) -> AppResult<ReviewSummary> {
        let (crop, _field) = self.require_steps()?;
        let location = self
            .locations
            .get(crop.location_id.unwrap_or_default())
            .await?;
        let area_f64 = location.area_ha.to_f64().unwrap_or(0.0);
        let estimate = self.draft.estimate(area_f64, &self.assumptions);

        Ok(ReviewSummary {
            location_name: location.name,
            area_ha: location.area_ha,
            water_type: crop.water_type,
            sowing_date: crop.sowing_date,
            assessment_date: crop.assessment_date,
            sample_count: self.draft.sample_areas.iter().filter(|s| s.is_valid()).count(),
            estimate,
            display: YieldSummary::from_estimate(estimate.as_ref()),
            report_type: self.draft.report_type.unwrap_or(ReportType::Basic),
        })
    }

    /// Terminal action: persist the assessment as a draft for later
    pub async fn save_draft(&mut self) -> AppResult<Assessment> {
        self.persist(AssessmentStatus::Draft).await
    }

    /// Terminal action: complete the assessment and generate its report
    pub async fn generate_report(&mut self) -> AppResult<(Assessment, Report)> {
        let assessment = self.persist(AssessmentStatus::Completed).await?;
        let report_type = self.draft.report_type.unwrap_or(ReportType::Basic);
        let report = self.reports.generate(assessment.id, report_type).await?;
        Ok((assessment, report))
    }

    /// Terminal action: discard the draft
    pub fn cancel(self) {
        tracing::debug!("assessment wizard cancelled");
    }

    async fn persist(&mut self, status: AssessmentStatus) -> AppResult<Assessment> {
        if self.step != WizardStep::Review {
            return Err(crate::error::AppError::InvalidStateTransition(
                "the wizard can only submit from the review step".to_string(),
            ));
        }
        let (crop, _) = self.require_steps()?;
        let location = self
            .locations
            .get(crop.location_id.unwrap_or_default())
            .await?;
        let area_f64 = location.area_ha.to_f64().unwrap_or(0.0);
        let input =
            self.draft
                .to_create_input(status, area_f64, &self.assumptions, self.today)?;
        self.assessments.create(input).await
    }

    fn require_steps(&self) -> AppResult<(&CropDetailsForm, &FieldSetupForm)> {
        let crop = self.draft.crop.as_ref().ok_or_else(|| {
            crate::error::AppError::Internal("crop details step incomplete".to_string())
        })?;
        let field = self.draft.field.as_ref().ok_or_else(|| {
            crate::error::AppError::Internal("field setup step incomplete".to_string())
        })?;
        Ok((crop, field))
    }
}
