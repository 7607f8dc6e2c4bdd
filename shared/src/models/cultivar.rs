//! Cultivar and crop type reference data

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A crop category (Fodder Beet, Sugar Beet, Mangels)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropType {
    pub id: Uuid,
    pub name: String,
}

/// A specific crop variety with known dry-matter and yield characteristics.
///
/// The ranges are catalogue figures kept as display strings, e.g.
/// `"14-18%"`, `"20-25 t DM/ha"`, `"24-30 weeks"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cultivar {
    pub id: Uuid,
    pub name: String,
    pub crop_type_id: Uuid,
    pub dry_matter_range: String,
    pub yield_range: String,
    pub growing_time_range: String,
    pub description: Option<String>,
    pub is_pgg_cultivar: bool,
}
