//! Warehouse and retail models: orders, crates, bills and the sold-stock ledger

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{random_code, timestamped_id};
use crate::types::QualityGrade;

/// Length of the code printed on a bill barcode
pub const BILL_CODE_LENGTH: usize = 8;

/// A retailer order against a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    pub retailer_id: String,
    pub batch_id: String,
    pub quantity: Decimal,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Order lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    /// Only pending orders may move, and only to a terminal state
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Fulfilled) | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Fulfilled => write!(f, "Fulfilled"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A packed crate taken from a batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crate {
    pub crate_id: String,
    pub batch_id: String,
    pub quantity: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A line on a retail bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillItem {
    pub batch_id: String,
    pub crate_id: Option<String>,
    pub quantity: Decimal,
    /// Grade at the time of sale, `None` for untested batches
    pub grade: Option<QualityGrade>,
    pub price_per_unit: i64,
    pub amount: Decimal,
    pub product_name: Option<String>,
}

impl BillItem {
    pub fn new(
        batch_id: impl Into<String>,
        crate_id: Option<String>,
        quantity: Decimal,
        grade: Option<QualityGrade>,
        price_per_unit: i64,
        product_name: Option<String>,
    ) -> Self {
        Self {
            batch_id: batch_id.into(),
            crate_id,
            quantity,
            grade,
            price_per_unit,
            amount: quantity * Decimal::from(price_per_unit),
            product_name,
        }
    }
}

/// A generated retail bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub bill_id: String,
    pub retailer_id: String,
    pub items: Vec<BillItem>,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    /// Code printed under the barcode, used for lookups
    pub unique_code: String,
}

/// Sum of all line amounts
pub fn bill_total(items: &[BillItem]) -> Decimal {
    items.iter().map(|i| i.amount).sum()
}

/// Quantity sold out of a batch so far
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub batch_id: String,
    pub sold_quantity: Decimal,
}

/// Quantity still available, never negative
pub fn available_quantity(total: Decimal, sold: Decimal) -> Decimal {
    (total - sold).max(Decimal::ZERO)
}

pub fn generate_order_id(now: DateTime<Utc>) -> String {
    timestamped_id("ORD", now, 4)
}

pub fn generate_crate_id(now: DateTime<Utc>) -> String {
    timestamped_id("CRT", now, 4)
}

pub fn generate_bill_id(now: DateTime<Utc>) -> String {
    timestamped_id("BILL", now, 4)
}

/// Eight random upper-case alphanumerics
pub fn generate_unique_code() -> String {
    random_code(BILL_CODE_LENGTH)
}
