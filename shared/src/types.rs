//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GPS coordinates of a paddock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

impl GpsCoordinates {
    pub fn new(latitude: Decimal, longitude: Decimal) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A feed season spanning two calendar years.
///
/// Fodder beet sown in spring is grazed over the following winter, so a
/// season is labelled by its sowing year and the year after, e.g.
/// `2025/2026`. Dates in July or later belong to the season starting that
/// year; dates up to the end of June belong to the season started the year
/// before.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Season {
    pub start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Season a given date falls in (month > 6 starts a new season).
    pub fn for_date(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        let start_year = if date.month() > 6 {
            date.year()
        } else {
            date.year() - 1
        };
        Self { start_year }
    }

    /// Display label, e.g. `2025/2026`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.start_year, self.start_year + 1)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
