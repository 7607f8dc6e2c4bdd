//! Yield and feeding-capacity estimation
//!
//! Pure arithmetic over sampled field measurements. A cut sample of known
//! row length and fresh weight, combined with its measured dry matter and
//! the paddock's row spacing, scales up to a per-hectare dry-matter yield;
//! the paddock area and an assumed herd turn that into feeding capacity.

use serde::{Deserialize, Serialize};

use crate::models::SampleArea;

/// Square meters in one hectare
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Herd assumed when none is configured
pub const DEFAULT_HERD_SIZE: u32 = 50;

/// Default intake per animal (kg DM/day)
pub const DEFAULT_INTAKE_KG_DM: f64 = 8.0;

/// Herd assumptions feeding-capacity figures are based on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FeedAssumptions {
    pub herd_size: u32,
    pub intake_kg_dm_per_day: f64,
}

impl Default for FeedAssumptions {
    fn default() -> Self {
        Self {
            herd_size: DEFAULT_HERD_SIZE,
            intake_kg_dm_per_day: DEFAULT_INTAKE_KG_DM,
        }
    }
}

/// Raw estimation results, kept as floats so they stay reproducible in
/// tests; display formatting lives in [`YieldSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    /// Mean dry matter over valid samples (%)
    pub dry_matter_percent: f64,
    /// Mean fresh weight per linear meter of row (kg/m)
    pub weight_per_meter_kg: f64,
    /// Dry-matter yield (t/ha)
    pub yield_t_ha: f64,
    /// Yield over the whole paddock (tonnes)
    pub total_yield_t: f64,
    /// Whole days the paddock feeds the assumed herd
    pub feeding_days: i64,
}

/// Estimate yield and feeding capacity from sample areas.
///
/// Only samples with length, weight and dry matter all present and positive
/// participate (see [`SampleArea::is_valid`]). Returns `None` when no valid
/// sample exists or the row spacing is not a positive number, in which case
/// every display output is `N/A`.
pub fn estimate_yield(
    samples: &[SampleArea],
    row_spacing_m: f64,
    field_area_ha: f64,
    assumptions: &FeedAssumptions,
) -> Option<YieldEstimate> {
    if !(row_spacing_m > 0.0) || assumptions.herd_size == 0 {
        return None;
    }

    let valid: Vec<&SampleArea> = samples.iter().filter(|s| s.is_valid()).collect();
    if valid.is_empty() {
        return None;
    }

    let count = valid.len() as f64;
    let dry_matter_percent = valid
        .iter()
        .map(|s| s.dry_matter_percent.unwrap_or_default())
        .sum::<f64>()
        / count;
    let weight_per_meter_kg = valid
        .iter()
        .map(|s| s.weight_kg.unwrap_or_default() / s.sample_length_m.unwrap_or_default())
        .sum::<f64>()
        / count;

    // One linear meter of row represents row_spacing m2 of paddock, so a
    // hectare holds 10000 / (row_spacing * 100) hundred-meter rows.
    let rows_per_hectare = SQUARE_METERS_PER_HECTARE / (row_spacing_m * 100.0);
    let yield_t_ha = weight_per_meter_kg * rows_per_hectare * (dry_matter_percent / 100.0);
    let total_yield_t = yield_t_ha * field_area_ha;
    let daily_demand_kg = assumptions.herd_size as f64 * assumptions.intake_kg_dm_per_day;
    let feeding_days = (total_yield_t * 1000.0 / daily_demand_kg).floor() as i64;

    Some(YieldEstimate {
        dry_matter_percent,
        weight_per_meter_kg,
        yield_t_ha,
        total_yield_t,
        feeding_days,
    })
}

/// Display strings for the review screen; `N/A` throughout when no
/// estimate could be made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct YieldSummary {
    pub yield_per_ha: String,
    pub total_yield: String,
    pub feeding_days: String,
}

impl YieldSummary {
    pub const NOT_AVAILABLE: &'static str = "N/A";

    pub fn from_estimate(estimate: Option<&YieldEstimate>) -> Self {
        match estimate {
            Some(e) => Self {
                yield_per_ha: format!("{:.1} t/ha", e.yield_t_ha),
                total_yield: format!("{:.1} tonnes", e.total_yield_t),
                feeding_days: format!("{} days", e.feeding_days),
            },
            None => Self {
                yield_per_ha: Self::NOT_AVAILABLE.to_string(),
                total_yield: Self::NOT_AVAILABLE.to_string(),
                feeding_days: Self::NOT_AVAILABLE.to_string(),
            },
        }
    }
}

/// Area covered by one measurement row (m2)
pub fn measurement_area_m2(row_spacing_m: f64, measurement_length_m: f64) -> f64 {
    (row_spacing_m * measurement_length_m).max(0.0)
}

/// Two-decimal display of the measurement area, e.g. `2.00`
pub fn measurement_area_display(row_spacing_m: f64, measurement_length_m: f64) -> String {
    format!(
        "{:.2}",
        measurement_area_m2(row_spacing_m, measurement_length_m)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(length: f64, weight: f64, dm: f64) -> SampleArea {
        SampleArea::new(length, weight, dm)
    }

    #[test]
    fn test_single_sample_reference_figures() {
        let samples = vec![sample(2.0, 25.4, 14.2)];
        let estimate =
            estimate_yield(&samples, 0.5, 3.5, &FeedAssumptions::default()).unwrap();

        assert!((estimate.weight_per_meter_kg - 12.7).abs() < 1e-9);
        // 12.7 * (10000 / 50) * 0.142
        assert!((estimate.yield_t_ha - 360.68).abs() < 1e-9);
        assert!((estimate.total_yield_t - 360.68 * 3.5).abs() < 1e-9);

        let summary = YieldSummary::from_estimate(Some(&estimate));
        assert_eq!(summary.yield_per_ha, "360.7 t/ha");
        assert_eq!(summary.total_yield, "1262.4 tonnes");
    }

    #[test]
    fn test_feeding_days_floor() {
        let samples = vec![sample(2.0, 25.4, 14.2)];
        let estimate =
            estimate_yield(&samples, 0.5, 3.5, &FeedAssumptions::default()).unwrap();
        // 1262.38 tonnes * 1000 / (50 * 8) = 3155.95 -> 3155
        assert_eq!(estimate.feeding_days, 3155);
        let summary = YieldSummary::from_estimate(Some(&estimate));
        assert_eq!(summary.feeding_days, "3155 days");
    }

    #[test]
    fn test_multiple_samples_average() {
        let samples = vec![sample(2.0, 24.0, 14.0), sample(4.0, 44.0, 16.0)];
        let estimate =
            estimate_yield(&samples, 0.5, 1.0, &FeedAssumptions::default()).unwrap();
        assert!((estimate.dry_matter_percent - 15.0).abs() < 1e-9);
        assert!((estimate.weight_per_meter_kg - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_valid_samples_is_not_available() {
        let summary = YieldSummary::from_estimate(
            estimate_yield(&[], 0.5, 3.5, &FeedAssumptions::default()).as_ref(),
        );
        assert_eq!(summary.yield_per_ha, "N/A");
        assert_eq!(summary.total_yield, "N/A");
        assert_eq!(summary.feeding_days, "N/A");
    }

    #[test]
    fn test_partial_samples_are_skipped() {
        let samples = vec![
            SampleArea {
                sample_length_m: Some(2.0),
                weight_kg: None,
                dry_matter_percent: Some(14.0),
                notes: None,
            },
            sample(2.0, 25.4, 14.2),
        ];
        let estimate =
            estimate_yield(&samples, 0.5, 3.5, &FeedAssumptions::default()).unwrap();
        assert!((estimate.weight_per_meter_kg - 12.7).abs() < 1e-9);
    }

    #[test]
    fn test_zero_length_sample_is_invalid() {
        // Zero reads as "not entered", and it would divide by zero
        let samples = vec![sample(0.0, 25.4, 14.2)];
        assert!(estimate_yield(&samples, 0.5, 3.5, &FeedAssumptions::default()).is_none());
    }

    #[test]
    fn test_zero_row_spacing_yields_nothing() {
        let samples = vec![sample(2.0, 25.4, 14.2)];
        assert!(estimate_yield(&samples, 0.0, 3.5, &FeedAssumptions::default()).is_none());
    }

    #[test]
    fn test_measurement_area() {
        assert_eq!(measurement_area_display(0.5, 4.0), "2.00");
        assert_eq!(measurement_area_display(1.0, 4.0), "4.00");
        assert_eq!(measurement_area_m2(-1.0, 4.0), 0.0);
    }
}
