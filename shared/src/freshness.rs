//! Shelf-life and freshness rules
//!
//! Shelf life starts from a base number of days keyed by grade and storage
//! type, scaled by a product modifier and rounded to whole days. Freshness is
//! a step function of the days left before expiry and must be recomputed on
//! every read, since it changes as the calendar advances.

use chrono::{Duration, Local, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::shelf_life_modifier;
use crate::types::{Firmness, FreshnessStatus, QualityGrade, StorageType};

/// Days remaining at or below which a batch should be consumed soon
pub const CONSUME_SOON_THRESHOLD_DAYS: i64 = 3;

/// Base shelf life in days for one grade
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShelfLifeRule {
    pub normal: i64,
    pub cold: i64,
}

impl ShelfLifeRule {
    pub fn days(&self, storage_type: StorageType) -> i64 {
        match storage_type {
            StorageType::Normal => self.normal,
            StorageType::Cold => self.cold,
        }
    }
}

/// Base shelf-life table keyed by grade
pub fn shelf_life_rule(grade: QualityGrade) -> ShelfLifeRule {
    match grade {
        QualityGrade::A => ShelfLifeRule { normal: 7, cold: 12 },
        QualityGrade::B => ShelfLifeRule { normal: 5, cold: 9 },
        QualityGrade::C => ShelfLifeRule { normal: 3, cold: 6 },
    }
}

/// Round half away from zero to a whole number
pub(crate) fn round_whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Shelf life in whole days for a grade, storage type and product
pub fn calculate_shelf_life(grade: QualityGrade, storage_type: StorageType, product_id: &str) -> i64 {
    let base = shelf_life_rule(grade).days(storage_type);
    round_whole(Decimal::from(base) * shelf_life_modifier(product_id))
}

/// Expiry date of a batch harvested on `harvest_date`
pub fn calculate_expiry_date(
    harvest_date: NaiveDate,
    grade: QualityGrade,
    storage_type: StorageType,
    product_id: &str,
) -> NaiveDate {
    harvest_date + Duration::days(calculate_shelf_life(grade, storage_type, product_id))
}

/// Whole days from `today` until `expiry_date`, negative once past
pub fn calculate_remaining_days(expiry_date: NaiveDate, today: NaiveDate) -> i64 {
    (expiry_date - today).num_days()
}

/// Classify remaining shelf life
pub fn determine_freshness_status(remaining_days: i64) -> FreshnessStatus {
    if remaining_days > CONSUME_SOON_THRESHOLD_DAYS {
        FreshnessStatus::Fresh
    } else if remaining_days >= 1 {
        FreshnessStatus::ConsumeSoon
    } else {
        FreshnessStatus::Expired
    }
}

pub fn is_sale_allowed(status: FreshnessStatus) -> bool {
    status != FreshnessStatus::Expired
}

/// Whole days elapsed since harvest
pub fn calculate_days_since_harvest(harvest_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - harvest_date).num_days()
}

/// Grade from a visual score (1-5) and firmness.
///
/// The total of visual score and firmness points maps to A at 6 or more,
/// B at 4 or more, and C otherwise.
pub fn grade_from_inspection(visual_quality: u8, firmness: Firmness) -> QualityGrade {
    let total = visual_quality.saturating_add(firmness.score());
    if total >= 6 {
        QualityGrade::A
    } else if total >= 4 {
        QualityGrade::B
    } else {
        QualityGrade::C
    }
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
