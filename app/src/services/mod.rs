//! Business logic services for Beet Guru

pub mod assessments;
pub mod auth;
pub mod cultivars;
pub mod customers;
pub mod locations;
pub mod reports;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use cultivars::CultivarService;
pub use customers::CustomerService;
pub use locations::LocationService;
pub use reports::ReportService;
