//! Agrovia Tracker
//!
//! Batch registry and services for the produce supply chain: intake, quality
//! grading, warehouse and retail stock movements, consumer scans and
//! analytics. Freshness is re-derived from the calendar on every read.

use std::sync::Arc;

use chrono::NaiveDate;

pub mod config;
pub mod demo;
pub mod error;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{
    BatchService, GradingService, ReportingService, RetailService, TraceabilityService,
    WarehouseService,
};
use store::Store;

/// Application state shared across services
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from configuration, seeding demo data when enabled
    pub fn new(config: Config, today: NaiveDate) -> AppResult<Self> {
        let store = Store::new();
        if config.demo.seed {
            demo::seed(&mut *store.write()?, today);
        }
        Ok(Self {
            store,
            config: Arc::new(config),
        })
    }

    pub fn batches(&self) -> BatchService {
        BatchService::new(self.store.clone())
    }

    pub fn grading(&self) -> GradingService {
        GradingService::new(self.store.clone())
    }

    pub fn retail(&self) -> RetailService {
        RetailService::new(self.store.clone(), self.config.retail.retailer_id.clone())
    }

    pub fn warehouse(&self) -> WarehouseService {
        WarehouseService::new(self.store.clone())
    }

    pub fn traceability(&self) -> TraceabilityService {
        TraceabilityService::new(self.store.clone())
    }

    pub fn reporting(&self) -> ReportingService {
        ReportingService::new(self.store.clone(), self.config.analytics.clone())
    }
}
