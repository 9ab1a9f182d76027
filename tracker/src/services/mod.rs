//! Business logic services for the Agrovia tracker

pub mod batch;
pub mod grading;
pub mod reporting;
pub mod retail;
pub mod traceability;
pub mod warehouse;

pub use batch::BatchService;
pub use grading::GradingService;
pub use reporting::ReportingService;
pub use retail::RetailService;
pub use traceability::TraceabilityService;
pub use warehouse::WarehouseService;
