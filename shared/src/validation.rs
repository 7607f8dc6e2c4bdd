//! Validation utilities for Beet Guru
//!
//! Field-level checks shared by the wizard forms, the services, and the
//! browser (via WASM).

use rust_decimal::Decimal;

// ============================================================================
// Field Measurement Validations
// ============================================================================

/// Minimum believable row spacing / measurement length (m)
pub const MIN_ROW_DIMENSION_M: f64 = 0.1;

/// Validate row spacing entered on the field-setup step (m)
pub fn validate_row_spacing(row_spacing_m: f64) -> Result<(), &'static str> {
    if !row_spacing_m.is_finite() {
        return Err("Row spacing must be a number");
    }
    if row_spacing_m <= MIN_ROW_DIMENSION_M {
        return Err("Row spacing must be greater than 0.1 m");
    }
    Ok(())
}

/// Validate measurement length entered on the field-setup step (m)
pub fn validate_measurement_length(length_m: f64) -> Result<(), &'static str> {
    if !length_m.is_finite() {
        return Err("Measurement length must be a number");
    }
    if length_m <= MIN_ROW_DIMENSION_M {
        return Err("Measurement length must be greater than 0.1 m");
    }
    Ok(())
}

/// Validate a dry-matter percentage (0-100)
pub fn validate_dry_matter_percent(dm: f64) -> Result<(), &'static str> {
    if !dm.is_finite() || dm < 0.0 || dm > 100.0 {
        return Err("Dry matter must be between 0 and 100%");
    }
    Ok(())
}

/// Validate a paddock area in hectares
pub fn validate_area_ha(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Area must be greater than zero");
    }
    Ok(())
}

/// Validate an estimated growing cost ($/ha)
pub fn validate_growing_cost(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Growing cost cannot be negative");
    }
    Ok(())
}

/// Validate a herd size used for feeding-capacity figures
pub fn validate_stock_count(count: i32) -> Result<(), &'static str> {
    if count <= 0 {
        return Err("Stock count must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a paddock or cultivar name
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty");
    }
    if name.len() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_row_spacing() {
        assert!(validate_row_spacing(0.5).is_ok());
        assert!(validate_row_spacing(0.11).is_ok());
        assert!(validate_row_spacing(0.1).is_err());
        assert!(validate_row_spacing(0.0).is_err());
        assert!(validate_row_spacing(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_measurement_length() {
        assert!(validate_measurement_length(4.0).is_ok());
        assert!(validate_measurement_length(0.1).is_err());
        assert!(validate_measurement_length(-4.0).is_err());
    }

    #[test]
    fn test_validate_dry_matter_percent() {
        assert!(validate_dry_matter_percent(0.0).is_ok());
        assert!(validate_dry_matter_percent(14.2).is_ok());
        assert!(validate_dry_matter_percent(100.0).is_ok());
        assert!(validate_dry_matter_percent(-0.1).is_err());
        assert!(validate_dry_matter_percent(100.1).is_err());
    }

    #[test]
    fn test_validate_area_ha() {
        assert!(validate_area_ha(Decimal::new(35, 1)).is_ok());
        assert!(validate_area_ha(Decimal::ZERO).is_err());
        assert!(validate_area_ha(Decimal::from(-2)).is_err());
    }

    #[test]
    fn test_validate_growing_cost() {
        assert!(validate_growing_cost(Decimal::from(2500)).is_ok());
        assert!(validate_growing_cost(Decimal::ZERO).is_ok());
        assert!(validate_growing_cost(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_stock_count() {
        assert!(validate_stock_count(50).is_ok());
        assert!(validate_stock_count(0).is_err());
        assert!(validate_stock_count(-5).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@beetguru.nz").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("North Paddock").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }
}
