//! Batch and traceability models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{random_code, timestamped_id};
use super::QualityTest;
use crate::freshness;
use crate::types::{FreshnessStatus, QualityGrade, StorageType};

/// A registered farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Farmer {
    /// Sequential id (e.g., "F001")
    pub farmer_id: String,
    /// Public code printed on labels (e.g., "FRM-A1X")
    pub farmer_code: String,
    pub name: String,
}

impl Farmer {
    pub fn new(farmer_id: impl Into<String>, farmer_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            farmer_id: farmer_id.into(),
            farmer_code: farmer_code.into(),
            name: name.into(),
        }
    }
}

/// Sequential farmer id for the `sequence`-th farmer
pub fn generate_farmer_id(sequence: usize) -> String {
    format!("F{:03}", sequence)
}

/// Random farmer label code
pub fn generate_farmer_code() -> String {
    format!("FRM-{}", random_code(3))
}

/// A tracked unit of harvested produce from one farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Batch {
    pub batch_id: String,
    /// Product id from the catalog
    pub crop_type: String,
    pub harvest_date: NaiveDate,
    pub farmer_id: String,
    pub quantity: Decimal,
    /// `None` until the batch has been quality tested
    pub quality_grade: Option<QualityGrade>,
    pub created_at: DateTime<Utc>,
}

/// Storage placement and computed expiry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Storage {
    pub batch_id: String,
    pub storage_type: StorageType,
    pub entry_date: NaiveDate,
    pub expected_shelf_life_days: i64,
    pub expiry_date: NaiveDate,
}

impl Storage {
    /// Compute storage for a batch harvested on `harvest_date`
    pub fn compute(
        batch_id: &str,
        storage_type: StorageType,
        entry_date: NaiveDate,
        harvest_date: NaiveDate,
        grade: QualityGrade,
        product_id: &str,
    ) -> Self {
        let expiry_date = freshness::calculate_expiry_date(harvest_date, grade, storage_type, product_id);
        Self {
            batch_id: batch_id.to_string(),
            storage_type,
            entry_date,
            expected_shelf_life_days: (expiry_date - harvest_date).num_days(),
            expiry_date,
        }
    }
}

/// Derived sale state of a batch as of a given day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetailStatus {
    pub batch_id: String,
    pub sell_by_date: NaiveDate,
    pub remaining_days: i64,
    pub status: FreshnessStatus,
    pub sale_allowed: bool,
}

impl RetailStatus {
    /// Evaluate the retail status of an expiry date on `today`
    pub fn evaluate(batch_id: &str, expiry_date: NaiveDate, today: NaiveDate) -> Self {
        let remaining_days = freshness::calculate_remaining_days(expiry_date, today);
        let status = freshness::determine_freshness_status(remaining_days);
        Self {
            batch_id: batch_id.to_string(),
            sell_by_date: expiry_date,
            remaining_days,
            status,
            sale_allowed: freshness::is_sale_allowed(status),
        }
    }
}

/// QR code mapping for consumer scans
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrMapping {
    pub qr_id: String,
    pub batch_id: String,
    pub public_url: String,
}

impl QrMapping {
    pub fn for_batch(batch_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            qr_id: generate_qr_id(now),
            batch_id: batch_id.to_string(),
            public_url: format!("/scan/{}", batch_id),
        }
    }
}

/// A batch together with everything recorded about it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchWithDetails {
    #[serde(flatten)]
    pub batch: Batch,
    pub quality_test: Option<QualityTest>,
    pub storage: Option<Storage>,
    pub retail_status: Option<RetailStatus>,
    pub qr_mapping: Option<QrMapping>,
    pub farmer: Option<Farmer>,
}

impl BatchWithDetails {
    /// Re-derive the retail status against `today`
    pub fn refreshed(mut self, today: NaiveDate) -> Self {
        if let Some(storage) = &self.storage {
            self.retail_status = Some(RetailStatus::evaluate(
                &self.batch.batch_id,
                storage.expiry_date,
                today,
            ));
        }
        self
    }

    pub fn status(&self) -> Option<FreshnessStatus> {
        self.retail_status.as_ref().map(|r| r.status)
    }

    pub fn is_graded(&self) -> bool {
        self.batch.quality_grade.is_some()
    }

    pub fn sale_allowed(&self) -> bool {
        self.retail_status.as_ref().map(|r| r.sale_allowed).unwrap_or(false)
    }
}

/// Generate a batch id (e.g., "BTH-LQ8Z3K2M-4F7Q")
pub fn generate_batch_id(now: DateTime<Utc>) -> String {
    timestamped_id("BTH", now, 4)
}

/// Generate a QR id (e.g., "QR-LQ8Z3K2M-4F7Q9X")
pub fn generate_qr_id(now: DateTime<Utc>) -> String {
    timestamped_id("QR", now, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_storage_compute_tomato_cold_a() {
        let harvest = date(2024, 1, 1);
        let storage = Storage::compute("BTH-1", StorageType::Cold, harvest, harvest, QualityGrade::A, "tomato");
        assert_eq!(storage.expiry_date, date(2024, 1, 13));
        assert_eq!(storage.expected_shelf_life_days, 12);
    }

    #[test]
    fn test_retail_status_evaluate() {
        let expiry = date(2024, 1, 13);
        let fresh = RetailStatus::evaluate("BTH-1", expiry, date(2024, 1, 5));
        assert_eq!(fresh.remaining_days, 8);
        assert_eq!(fresh.status, FreshnessStatus::Fresh);
        assert!(fresh.sale_allowed);

        let expired = RetailStatus::evaluate("BTH-1", expiry, date(2024, 1, 13));
        assert_eq!(expired.remaining_days, 0);
        assert_eq!(expired.status, FreshnessStatus::Expired);
        assert!(!expired.sale_allowed);
    }

    #[test]
    fn test_qr_mapping_public_url() {
        let qr = QrMapping::for_batch("BTH-ABC-1234", Utc::now());
        assert_eq!(qr.public_url, "/scan/BTH-ABC-1234");
        assert!(qr.qr_id.starts_with("QR-"));
    }

    #[test]
    fn test_farmer_ids() {
        assert_eq!(generate_farmer_id(4), "F004");
        let code = generate_farmer_code();
        assert!(code.starts_with("FRM-"));
        assert_eq!(code.len(), 7);
    }
}
