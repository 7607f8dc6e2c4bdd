//! Beet Guru application core
//!
//! An agronomy assistant for recording fodder beet crop assessments,
//! estimating yield and feeding capacity, and managing paddocks, customers,
//! cultivars and users. The data layer is a mock, in-memory store with
//! simulated network latency.

pub mod config;
pub mod error;
pub mod forms;
pub mod services;
pub mod shell;
pub mod storage;
pub mod store;
pub mod wizard;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{
    AssessmentService, AuthService, CultivarService, CustomerService, LocationService,
    ReportService,
};
use store::MemoryStore;

/// The services every screen works through, wired over one store
#[derive(Clone)]
pub struct AppContext {
    pub locations: LocationService,
    pub cultivars: CultivarService,
    pub assessments: AssessmentService,
    pub reports: ReportService,
    pub customers: CustomerService,
    pub auth: AuthService,
}

impl AppContext {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            locations: LocationService::new(store.clone(), store.clone()),
            cultivars: CultivarService::new(store.clone(), store.clone()),
            assessments: AssessmentService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            ),
            reports: ReportService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            ),
            customers: CustomerService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            ),
            auth: AuthService::new(store.clone(), store),
        }
    }
}
