//! Batch traceability service for public QR code scans
//!
//! Aggregates what a consumer sees after scanning a batch label: product,
//! farm origin, harvest age and current freshness.

use chrono::NaiveDate;
use serde::Serialize;

use shared::{
    calculate_days_since_harvest, product_name, product_unit, validate_batch_id, FreshnessStatus,
    QualityGrade, StorageType,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Traceability service for public batch information
#[derive(Clone)]
pub struct TraceabilityService {
    store: Store,
}

/// Public view of a scanned batch
#[derive(Debug, Serialize)]
pub struct ConsumerView {
    pub batch_id: String,
    pub product_name: String,
    pub unit: &'static str,
    pub origin: Option<OriginInfo>,
    pub harvest_date: NaiveDate,
    pub days_since_harvest: i64,
    pub grade: Option<QualityGrade>,
    pub storage_type: Option<StorageType>,
    pub freshness: Option<FreshnessInfo>,
}

/// Farm origin (limited for public view)
#[derive(Debug, Serialize)]
pub struct OriginInfo {
    pub farmer_name: String,
    pub farmer_code: String,
}

/// Freshness as of the scan
#[derive(Debug, Serialize)]
pub struct FreshnessInfo {
    pub expiry_date: NaiveDate,
    pub remaining_days: i64,
    pub status: FreshnessStatus,
    pub message: &'static str,
}

impl TraceabilityService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolve a scanned batch id (case-insensitive)
    pub fn scan(&self, batch_id: &str, today: NaiveDate) -> AppResult<ConsumerView> {
        validate_batch_id(&batch_id.trim().to_ascii_uppercase())
            .map_err(|msg| AppError::invalid("batch_id", msg))?;

        let state = self.store.read()?;
        let details = state
            .batch(batch_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Batch {}", batch_id)))?
            .refreshed(today);

        let origin = details
            .farmer
            .as_ref()
            .or_else(|| state.farmer(&details.batch.farmer_id))
            .map(|f| OriginInfo {
                farmer_name: f.name.clone(),
                farmer_code: f.farmer_code.clone(),
            });

        let freshness = details.retail_status.as_ref().map(|r| FreshnessInfo {
            expiry_date: r.sell_by_date,
            remaining_days: r.remaining_days,
            status: r.status,
            message: r.status.consumer_message(),
        });

        let batch = &details.batch;
        tracing::debug!("Consumer scan of batch {}", batch.batch_id);

        Ok(ConsumerView {
            batch_id: batch.batch_id.clone(),
            product_name: product_name(&batch.crop_type).to_string(),
            unit: product_unit(&batch.crop_type),
            origin,
            harvest_date: batch.harvest_date,
            days_since_harvest: calculate_days_since_harvest(batch.harvest_date, today),
            grade: batch.quality_grade,
            storage_type: details.storage.as_ref().map(|s| s.storage_type),
            freshness,
        })
    }
}
