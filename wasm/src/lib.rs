//! WebAssembly module for Beet Guru
//!
//! Provides client-side computation for:
//! - Yield and feeding-capacity estimation
//! - Measurement area derivation
//! - Feed season labelling
//! - Offline field validation

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::estimation::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Estimate yield from a JSON array of sample areas. Returns the display
/// summary as JSON (`N/A` throughout when no sample is valid).
#[wasm_bindgen]
pub fn estimate_yield_summary(
    samples_json: &str,
    row_spacing_m: f64,
    field_area_ha: f64,
    herd_size: u32,
    intake_kg_dm_per_day: f64,
) -> Result<String, JsValue> {
    let samples: Vec<SampleArea> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;

    let assumptions = FeedAssumptions {
        herd_size,
        intake_kg_dm_per_day,
    };
    let estimate = estimate_yield(&samples, row_spacing_m, field_area_ha, &assumptions);
    let summary = YieldSummary::from_estimate(estimate.as_ref());

    serde_json::to_string(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Dry-matter yield in t/ha, or NaN when no valid sample exists
#[wasm_bindgen]
pub fn estimate_yield_t_ha(
    samples_json: &str,
    row_spacing_m: f64,
    field_area_ha: f64,
) -> Result<f64, JsValue> {
    let samples: Vec<SampleArea> = serde_json::from_str(samples_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid samples JSON: {}", e)))?;

    Ok(
        estimate_yield(
            &samples,
            row_spacing_m,
            field_area_ha,
            &FeedAssumptions::default(),
        )
        .map(|e| e.yield_t_ha)
        .unwrap_or(f64::NAN),
    )
}

/// Area covered by one measurement row (m2)
#[wasm_bindgen]
pub fn measurement_area(row_spacing_m: f64, measurement_length_m: f64) -> f64 {
    measurement_area_m2(row_spacing_m, measurement_length_m)
}

/// Two-decimal measurement area display, e.g. `"2.00"`
#[wasm_bindgen]
pub fn measurement_area_text(row_spacing_m: f64, measurement_length_m: f64) -> String {
    measurement_area_display(row_spacing_m, measurement_length_m)
}

/// Feed season label for an ISO date, e.g. `"2025/2026"`
#[wasm_bindgen]
pub fn season_label(date_iso: &str) -> Result<String, JsValue> {
    let date: chrono::NaiveDate = date_iso
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid date: {}", e)))?;
    Ok(Season::for_date(date).label())
}

/// Whether a dry-matter percentage is in the accepted 0-100 range
#[wasm_bindgen]
pub fn is_valid_dry_matter(dm_percent: f64) -> bool {
    validate_dry_matter_percent(dm_percent).is_ok()
}

/// Whether a row spacing passes the field-setup validation
#[wasm_bindgen]
pub fn is_valid_row_spacing(row_spacing_m: f64) -> bool {
    validate_row_spacing(row_spacing_m).is_ok()
}

/// Whether a paddock area in hectares is accepted
#[wasm_bindgen]
pub fn is_valid_area(area_ha: f64) -> bool {
    rust_decimal::Decimal::try_from(area_ha)
        .map(|area| validate_area_ha(area).is_ok())
        .unwrap_or(false)
}

/// Basic email check used before requesting a verification code
#[wasm_bindgen]
pub fn is_valid_email(email: &str) -> bool {
    validate_email(email).is_ok()
}
