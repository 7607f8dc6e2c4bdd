//! Report models — shareable summaries derived from completed assessments

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Depth of a generated report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Basic,
    Advanced,
}

impl ReportType {
    /// Page count of the rendered document
    pub fn pages(&self) -> u32 {
        match self {
            ReportType::Basic => 2,
            ReportType::Advanced => 5,
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Basic => write!(f, "Basic"),
            ReportType::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Delivery state of a report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Sent,
}

/// A generated, shareable summary derived from exactly one completed
/// assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub title: String,
    pub report_type: ReportType,
    pub created: NaiveDate,
    pub status: ReportStatus,
    pub pages: u32,
    pub recipients: Vec<String>,
    /// Cultivar name at generation time (denormalized for display)
    pub cultivar: String,
    /// Feed season label computed from the assessment date, e.g. `2025/2026`
    pub season: String,
}
