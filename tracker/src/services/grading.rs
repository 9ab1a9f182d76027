//! Quality grading service

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::{
    calculate_remaining_days, grade_from_inspection, product_price, product_unit, BatchWithDetails,
    Firmness, QualityGrade, QualityTest, RetailStatus, Storage, StorageType,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Grading service for inspecting batches and pricing them
#[derive(Clone)]
pub struct GradingService {
    store: Store,
}

/// Input for recording an inspection
#[derive(Debug, Deserialize, Validate)]
pub struct GradeBatchInput {
    #[validate(range(min = 1, max = 5, message = "Visual quality must be between 1 and 5"))]
    pub visual_quality: u8,
    pub firmness: Firmness,
}

/// Grade and price a batch would receive
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GradePreview {
    pub grade: QualityGrade,
    pub price_per_unit: i64,
    pub unit: &'static str,
}

/// Result of grading a batch
#[derive(Debug, Clone, Serialize)]
pub struct GradingOutcome {
    pub batch: BatchWithDetails,
    pub grade: QualityGrade,
    pub price_per_unit: i64,
    pub unit: &'static str,
    /// Price the same batch would fetch at grade C
    pub grade_c_price: i64,
}

impl GradingService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Grade and price for an inspection without recording it
    pub fn preview(&self, product_id: &str, input: &GradeBatchInput) -> AppResult<GradePreview> {
        input.validate()?;
        let grade = grade_from_inspection(input.visual_quality, input.firmness);
        Ok(GradePreview {
            grade,
            price_per_unit: product_price(product_id, grade),
            unit: product_unit(product_id),
        })
    }

    /// Record an inspection, then recompute expiry and retail status from
    /// the derived grade.
    pub fn grade_batch(
        &self,
        batch_id: &str,
        input: GradeBatchInput,
        today: NaiveDate,
    ) -> AppResult<GradingOutcome> {
        input.validate()?;

        let mut state = self.store.write()?;
        let details = state
            .batch_mut(batch_id)
            .ok_or_else(|| AppError::NotFound(format!("Batch {}", batch_id)))?;

        if details.is_graded() {
            tracing::warn!("Rejected regrade of batch {}", details.batch.batch_id);
            return Err(AppError::AlreadyGraded(details.batch.batch_id.clone()));
        }

        let batch = &details.batch;
        let (storage_type, entry_date) = details
            .storage
            .as_ref()
            .map(|s| (s.storage_type, s.entry_date))
            .unwrap_or((StorageType::Normal, batch.harvest_date));

        let grade = grade_from_inspection(input.visual_quality, input.firmness);
        let storage = Storage::compute(
            &batch.batch_id,
            storage_type,
            entry_date,
            batch.harvest_date,
            grade,
            &batch.crop_type,
        );
        let remaining_days = calculate_remaining_days(storage.expiry_date, today);
        let quality_test = QualityTest::record(
            &batch.batch_id,
            input.visual_quality,
            input.firmness,
            remaining_days,
            today,
        );
        let retail_status = RetailStatus::evaluate(&batch.batch_id, storage.expiry_date, today);

        details.batch.quality_grade = Some(grade);
        details.quality_test = Some(quality_test);
        details.storage = Some(storage);
        details.retail_status = Some(retail_status);

        let product_id = details.batch.crop_type.clone();
        let outcome = GradingOutcome {
            batch: details.clone(),
            grade,
            price_per_unit: product_price(&product_id, grade),
            unit: product_unit(&product_id),
            grade_c_price: product_price(&product_id, QualityGrade::C),
        };

        tracing::info!(
            batch_id = %outcome.batch.batch.batch_id,
            grade = %grade,
            price = outcome.price_per_unit,
            "Batch graded"
        );
        Ok(outcome)
    }
}
