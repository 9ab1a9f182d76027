//! Quality inspection models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::freshness::grade_from_inspection;
use crate::types::{Firmness, QualityGrade};

/// Lowest accepted visual quality score
pub const MIN_VISUAL_QUALITY: u8 = 1;
/// Highest accepted visual quality score
pub const MAX_VISUAL_QUALITY: u8 = 5;

/// Result of inspecting a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityTest {
    pub test_id: String,
    pub batch_id: String,
    /// Visual quality score (1-5)
    pub visual_quality: u8,
    /// Remaining shelf-life days at the time of the test
    pub freshness_days: i64,
    pub firmness: Firmness,
    pub final_grade: QualityGrade,
    pub test_date: NaiveDate,
}

impl QualityTest {
    /// Record an inspection, deriving the final grade
    pub fn record(
        batch_id: &str,
        visual_quality: u8,
        firmness: Firmness,
        freshness_days: i64,
        test_date: NaiveDate,
    ) -> Self {
        Self {
            test_id: format!("TEST-{}", batch_id),
            batch_id: batch_id.to_string(),
            visual_quality,
            freshness_days,
            firmness,
            final_grade: grade_from_inspection(visual_quality, firmness),
            test_date,
        }
    }

    /// Inspection total used for grading
    pub fn total_score(&self) -> u8 {
        self.visual_quality.saturating_add(self.firmness.score())
    }
}

/// Typical inspection inputs that reproduce a grade
pub fn representative_inspection(grade: QualityGrade) -> (u8, Firmness) {
    match grade {
        QualityGrade::A => (5, Firmness::High),
        QualityGrade::B => (3, Firmness::Medium),
        QualityGrade::C => (2, Firmness::Low),
    }
}
