//! Assessment models — one measurement/estimation session for a paddock

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of an assessment.
///
/// Transitions only `Draft -> Completed`, never back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Draft,
    Completed,
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentStatus::Draft => write!(f, "Draft"),
            AssessmentStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Water supply for the paddock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaterType {
    Irrigated,
    Dryland,
}

impl std::fmt::Display for WaterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterType::Irrigated => write!(f, "Irrigated"),
            WaterType::Dryland => write!(f, "Dryland"),
        }
    }
}

/// Fresh-weight split of a counted sample row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlantMeasurement {
    /// Leaf weight (kg)
    pub leaf: f64,
    /// Bulb weight (kg)
    pub bulb: f64,
    /// Plants counted in the row
    pub plants: u32,
}

/// One cut-and-weighed sample used for yield estimation.
///
/// Fields are optional because samples are filled in incrementally during
/// the measurements step; only fully-entered samples feed the calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SampleArea {
    /// Length of row harvested for the sample (m)
    pub sample_length_m: Option<f64>,
    /// Fresh weight of the sample (kg)
    pub weight_kg: Option<f64>,
    /// Measured dry matter of the sample (%)
    pub dry_matter_percent: Option<f64>,
    pub notes: Option<String>,
}

impl SampleArea {
    pub fn new(sample_length_m: f64, weight_kg: f64, dry_matter_percent: f64) -> Self {
        Self {
            sample_length_m: Some(sample_length_m),
            weight_kg: Some(weight_kg),
            dry_matter_percent: Some(dry_matter_percent),
            notes: None,
        }
    }

    /// A sample feeds the yield estimate only when length, weight and dry
    /// matter are all present and strictly positive. A zero-length sample
    /// is indistinguishable from an unentered one and would divide by zero.
    pub fn is_valid(&self) -> bool {
        matches!(
            (self.sample_length_m, self.weight_kg, self.dry_matter_percent),
            (Some(length), Some(weight), Some(dm)) if length > 0.0 && weight > 0.0 && dm > 0.0
        )
    }
}

/// The central transactional entity: a dry-matter sampling session for one
/// paddock, progressing from draft to completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    pub location_id: Uuid,
    pub crop_type_id: Uuid,
    /// Selected catalogue cultivar; absent when a custom name was entered
    pub cultivar_id: Option<Uuid>,
    pub custom_cultivar_name: Option<String>,
    /// Record date (defaults to the day the assessment was created)
    pub date: NaiveDate,
    /// Date the field was walked and sampled
    pub assessment_date: NaiveDate,
    pub sowing_date: NaiveDate,
    pub status: AssessmentStatus,
    pub water_type: WaterType,
    pub row_spacing_m: f64,
    pub measurement_length_m: f64,
    pub estimated_growing_cost: Decimal,
    pub measurements: Vec<PlantMeasurement>,
    pub sample_areas: Vec<SampleArea>,
    /// Averaged dry matter over valid samples (%)
    pub dry_matter_percent: Option<f64>,
    /// Estimated yield (t DM/ha)
    pub estimated_yield_t_ha: Option<f64>,
    /// Estimated yield over the whole paddock (tonnes DM)
    pub total_yield_t: Option<f64>,
    /// Days the paddock will feed the assumed herd
    pub feeding_capacity_days: Option<i64>,
    pub stock_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
