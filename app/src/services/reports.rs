//! Report service — generation and delivery of assessment summaries

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::store::{
    AssessmentRepository, CultivarRepository, LocationRepository, ReportRepository,
};
use shared::models::{AssessmentStatus, Report, ReportStatus, ReportType};
use shared::types::Season;
use shared::validation::validate_email;

/// Report service
#[derive(Clone)]
pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    locations: Arc<dyn LocationRepository>,
    cultivars: Arc<dyn CultivarRepository>,
}

impl ReportService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        locations: Arc<dyn LocationRepository>,
        cultivars: Arc<dyn CultivarRepository>,
    ) -> Self {
        Self {
            reports,
            assessments,
            locations,
            cultivars,
        }
    }

    /// List all reports, newest first
    pub async fn list(&self) -> AppResult<Vec<Report>> {
        let mut reports = self.reports.list().await?;
        reports.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(reports)
    }

    /// Get a report by id
    pub async fn get(&self, id: Uuid) -> AppResult<Report> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Report".to_string()))
    }

    /// Generate a report from a completed assessment. The feed season is
    /// derived from the assessment date: July onward starts a new season.
    pub async fn generate(
        &self,
        assessment_id: Uuid,
        report_type: ReportType,
    ) -> AppResult<Report> {
        let assessment = self
            .assessments
            .find_by_id(assessment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assessment".to_string()))?;

        if assessment.status != AssessmentStatus::Completed {
            return Err(AppError::InvalidStateTransition(
                "reports can only be generated from completed assessments".to_string(),
            ));
        }

        let location_name = self
            .locations
            .find_by_id(assessment.location_id)
            .await?
            .map(|l| l.name)
            .unwrap_or_else(|| "Unknown paddock".to_string());
        let cultivar = match (assessment.cultivar_id, &assessment.custom_cultivar_name) {
            (Some(cultivar_id), _) => self
                .cultivars
                .find_by_id(cultivar_id)
                .await?
                .map(|c| c.name)
                .unwrap_or_else(|| "Unspecified".to_string()),
            (None, Some(custom)) => custom.clone(),
            (None, None) => "Unspecified".to_string(),
        };

        let season = Season::for_date(assessment.date);
        let report = Report {
            id: Uuid::new_v4(),
            assessment_id,
            title: format!("{} {} Yield Report", location_name, season),
            report_type,
            created: Utc::now().date_naive(),
            status: ReportStatus::Draft,
            pages: report_type.pages(),
            recipients: Vec::new(),
            cultivar,
            season: season.label(),
        };

        tracing::info!(report = %report.id, assessment = %assessment_id, "report generated");
        self.reports.insert(report).await
    }

    /// Send a report to a list of recipients
    pub async fn send(&self, id: Uuid, recipients: Vec<String>) -> AppResult<Report> {
        if recipients.is_empty() {
            return Err(AppError::validation(
                "recipients",
                "At least one recipient is required",
            ));
        }
        for recipient in &recipients {
            validate_email(recipient)
                .map_err(|message| AppError::validation("recipients", message))?;
        }

        let mut report = self.get(id).await?;
        report.recipients = recipients;
        report.status = ReportStatus::Sent;
        self.reports.update(report).await
    }
}
