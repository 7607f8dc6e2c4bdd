//! Per-step form values and validators for the assessment wizard

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::AssessmentDefaults;
use crate::forms::{FieldErrors, FormSchema};
use shared::estimation::{measurement_area_display, measurement_area_m2};
use shared::models::WaterType;
use shared::validation::{
    validate_dry_matter_percent, validate_growing_cost, validate_measurement_length,
    validate_row_spacing,
};

/// Cultivar selection on the crop-details step. `Other` reveals the
/// required custom-cultivar name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CultivarChoice {
    #[default]
    Unselected,
    Listed(Uuid),
    Other,
}

/// Crop-details step values
#[derive(Debug, Clone, PartialEq)]
pub struct CropDetailsForm {
    pub location_id: Option<Uuid>,
    pub crop_type_id: Option<Uuid>,
    pub cultivar: CultivarChoice,
    pub custom_cultivar_name: String,
    pub stock_type: String,
    pub sowing_date: NaiveDate,
    pub assessment_date: NaiveDate,
    pub water_type: WaterType,
    pub estimated_growing_cost: Decimal,
}

impl CropDetailsForm {
    /// Defaults for a wizard opened on `today`: sowing the previous
    /// October 20, assessed today, dryland, $2500/ha.
    pub fn for_date(today: NaiveDate) -> Self {
        let sowing_date = NaiveDate::from_ymd_opt(today.year() - 1, 10, 20)
            .unwrap_or(today);
        Self {
            location_id: None,
            crop_type_id: None,
            cultivar: CultivarChoice::Unselected,
            custom_cultivar_name: String::new(),
            stock_type: String::new(),
            sowing_date,
            assessment_date: today,
            water_type: WaterType::Dryland,
            estimated_growing_cost: Decimal::from(2500),
        }
    }
}

impl FormSchema for CropDetailsForm {
    const FIELDS: &'static [&'static str] = &[
        "location_id",
        "crop_type_id",
        "cultivar",
        "custom_cultivar_name",
        "stock_type",
        "sowing_date",
        "assessment_date",
        "water_type",
        "estimated_growing_cost",
    ];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.location_id.is_none() {
            errors.insert("location_id", "Please select a paddock".to_string());
        }
        if self.crop_type_id.is_none() {
            errors.insert("crop_type_id", "Please select a crop type".to_string());
        }
        match self.cultivar {
            CultivarChoice::Unselected => {
                errors.insert("cultivar", "Please select a cultivar".to_string());
            }
            CultivarChoice::Other => {
                if self.custom_cultivar_name.trim().is_empty() {
                    errors.insert(
                        "custom_cultivar_name",
                        "Please enter the cultivar name".to_string(),
                    );
                }
            }
            CultivarChoice::Listed(_) => {}
        }
        if let Err(message) = validate_growing_cost(self.estimated_growing_cost) {
            errors.insert("estimated_growing_cost", message.to_string());
        }
        errors
    }
}

/// Whether the dry-matter figures are field estimates or lab actuals;
/// only the field labels change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Estimate,
    Actual,
}

impl ValueType {
    pub fn label(&self) -> &'static str {
        match self {
            ValueType::Estimate => "Estimated",
            ValueType::Actual => "Actual",
        }
    }

    /// Label for a dry-matter field, e.g. `Estimated bulb DM %`
    pub fn field_label(&self, part: &str) -> String {
        format!("{} {} DM %", self.label(), part)
    }
}

/// Field-setup step values
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSetupForm {
    pub row_spacing_m: f64,
    pub measurement_length_m: f64,
    pub value_type: ValueType,
    pub bulb_dry_matter_percent: Option<f64>,
    pub leaf_dry_matter_percent: Option<f64>,
}

impl FieldSetupForm {
    pub fn with_defaults(defaults: &AssessmentDefaults) -> Self {
        Self {
            row_spacing_m: defaults.row_spacing_m,
            measurement_length_m: defaults.measurement_length_m,
            value_type: ValueType::Estimate,
            bulb_dry_matter_percent: None,
            leaf_dry_matter_percent: None,
        }
    }

    /// Area covered by one measurement row (m2), derived reactively
    pub fn measurement_area_m2(&self) -> f64 {
        measurement_area_m2(self.row_spacing_m, self.measurement_length_m)
    }

    /// Two-decimal display of the measurement area
    pub fn measurement_area_display(&self) -> String {
        measurement_area_display(self.row_spacing_m, self.measurement_length_m)
    }
}

impl Default for FieldSetupForm {
    fn default() -> Self {
        Self::with_defaults(&AssessmentDefaults::default())
    }
}

impl FormSchema for FieldSetupForm {
    const FIELDS: &'static [&'static str] = &[
        "row_spacing_m",
        "measurement_length_m",
        "value_type",
        "bulb_dry_matter_percent",
        "leaf_dry_matter_percent",
    ];

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(message) = validate_row_spacing(self.row_spacing_m) {
            errors.insert("row_spacing_m", message.to_string());
        }
        if let Err(message) = validate_measurement_length(self.measurement_length_m) {
            errors.insert("measurement_length_m", message.to_string());
        }
        if let Some(bulb) = self.bulb_dry_matter_percent {
            if let Err(message) = validate_dry_matter_percent(bulb) {
                errors.insert("bulb_dry_matter_percent", message.to_string());
            }
        }
        if let Some(leaf) = self.leaf_dry_matter_percent {
            if let Err(message) = validate_dry_matter_percent(leaf) {
                errors.insert("leaf_dry_matter_percent", message.to_string());
            }
        }
        errors
    }
}
