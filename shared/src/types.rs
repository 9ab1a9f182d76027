//! Common types used across the platform

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing one of the string-coded enums
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Quality tier assigned after inspection, A being the best
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityGrade {
    A,
    B,
    C,
}

impl QualityGrade {
    pub const ALL: [QualityGrade; 3] = [QualityGrade::A, QualityGrade::B, QualityGrade::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityGrade::A => "A",
            QualityGrade::B => "B",
            QualityGrade::C => "C",
        }
    }

    /// Label used on reports
    pub fn label(&self) -> &'static str {
        match self {
            QualityGrade::A => "Grade A (Premium)",
            QualityGrade::B => "Grade B (Standard)",
            QualityGrade::C => "Grade C (Economy)",
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityGrade {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(QualityGrade::A),
            "B" => Ok(QualityGrade::B),
            "C" => Ok(QualityGrade::C),
            _ => Err(ParseEnumError::new("quality grade", s)),
        }
    }
}

/// How a batch is kept between intake and sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum StorageType {
    #[default]
    Normal,
    Cold,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Normal => "Normal",
            StorageType::Cold => "Cold",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(StorageType::Normal),
            "cold" => Ok(StorageType::Cold),
            _ => Err(ParseEnumError::new("storage type", s)),
        }
    }
}

/// Firmness category observed during inspection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Firmness {
    Low,
    #[default]
    Medium,
    High,
}

impl Firmness {
    /// Points contributed to the inspection total
    pub fn score(&self) -> u8 {
        match self {
            Firmness::High => 2,
            Firmness::Medium => 1,
            Firmness::Low => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Firmness::Low => "Low",
            Firmness::Medium => "Medium",
            Firmness::High => "High",
        }
    }
}

impl fmt::Display for Firmness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Firmness {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Firmness::Low),
            "medium" => Ok(Firmness::Medium),
            "high" => Ok(Firmness::High),
            _ => Err(ParseEnumError::new("firmness", s)),
        }
    }
}

/// Derived classification of remaining shelf life.
///
/// Always recomputed from the current date; never treat a stored value as
/// authoritative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FreshnessStatus {
    Fresh,
    #[serde(rename = "Consume Soon")]
    ConsumeSoon,
    Expired,
}

impl FreshnessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessStatus::Fresh => "Fresh",
            FreshnessStatus::ConsumeSoon => "Consume Soon",
            FreshnessStatus::Expired => "Expired",
        }
    }

    /// Position on the freshness scale, higher is fresher
    pub fn rank(&self) -> u8 {
        match self {
            FreshnessStatus::Expired => 0,
            FreshnessStatus::ConsumeSoon => 1,
            FreshnessStatus::Fresh => 2,
        }
    }

    /// Message shown to consumers scanning a batch
    pub fn consumer_message(&self) -> &'static str {
        match self {
            FreshnessStatus::Fresh => "This product is fresh and safe to consume.",
            FreshnessStatus::ConsumeSoon => "Best consumed within the next few days.",
            FreshnessStatus::Expired => {
                "This product has passed its recommended consumption date."
            }
        }
    }
}

impl fmt::Display for FreshnessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreshnessStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fresh" => Ok(FreshnessStatus::Fresh),
            "consume soon" | "consumesoon" | "consume_soon" => Ok(FreshnessStatus::ConsumeSoon),
            "expired" => Ok(FreshnessStatus::Expired),
            _ => Err(ParseEnumError::new("freshness status", s)),
        }
    }
}

/// Inclusive date range for report queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// From `days` days before `today` through `today`, both ends included
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        Self {
            start: today - chrono::Duration::days(i64::from(days)),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
