//! Warehouse stock board and expiry alerts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shared::{product_name, BatchWithDetails, FreshnessStatus, CONSUME_SOON_THRESHOLD_DAYS};

use crate::error::AppResult;
use crate::store::Store;

/// Warehouse service for the stock board
#[derive(Clone)]
pub struct WarehouseService {
    store: Store,
}

/// Stock board filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockFilter {
    /// Only batches in this status
    pub status: Option<FreshnessStatus>,
    /// Case-insensitive batch id fragment
    pub search: Option<String>,
}

/// How soon an alert needs attention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Urgent,
    Warning,
}

/// A batch about to expire
#[derive(Debug, Clone, Serialize)]
pub struct ExpiryAlert {
    pub batch_id: String,
    pub product_name: String,
    pub remaining_days: i64,
    pub level: AlertLevel,
    pub message: String,
}

impl ExpiryAlert {
    fn for_batch(batch: &BatchWithDetails, remaining_days: i64) -> Self {
        let batch_id = batch.batch.batch_id.clone();
        let (level, message) = if remaining_days <= 1 {
            (AlertLevel::Urgent, format!("URGENT: {} expires tomorrow!", batch_id))
        } else {
            (
                AlertLevel::Warning,
                format!("Warning: {} expires in {} days", batch_id, remaining_days),
            )
        };
        Self {
            product_name: product_name(&batch.batch.crop_type).to_string(),
            batch_id,
            remaining_days,
            level,
            message,
        }
    }
}

fn remaining_days(batch: &BatchWithDetails) -> i64 {
    batch.retail_status.as_ref().map_or(0, |r| r.remaining_days)
}

impl WarehouseService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    fn refreshed_batches(&self, today: NaiveDate) -> AppResult<Vec<BatchWithDetails>> {
        let state = self.store.read()?;
        Ok(state
            .batches
            .iter()
            .cloned()
            .map(|b| b.refreshed(today))
            .collect())
    }

    /// Batches matching `filter`, soonest to expire first
    pub fn stock_board(&self, today: NaiveDate, filter: &StockFilter) -> AppResult<Vec<BatchWithDetails>> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase);

        let mut rows: Vec<_> = self
            .refreshed_batches(today)?
            .into_iter()
            .filter(|b| filter.status.map_or(true, |status| b.status() == Some(status)))
            .filter(|b| {
                search
                    .as_deref()
                    .map_or(true, |q| b.batch.batch_id.to_ascii_lowercase().contains(q))
            })
            .collect();

        rows.sort_by_key(remaining_days);
        Ok(rows)
    }

    /// Alerts for sellable batches with at most three days left
    pub fn expiry_alerts(&self, today: NaiveDate) -> AppResult<Vec<ExpiryAlert>> {
        let mut alerts: Vec<_> = self
            .refreshed_batches(today)?
            .iter()
            .filter_map(|b| {
                let remaining = b.retail_status.as_ref()?.remaining_days;
                (1..=CONSUME_SOON_THRESHOLD_DAYS)
                    .contains(&remaining)
                    .then(|| ExpiryAlert::for_batch(b, remaining))
            })
            .collect();

        alerts.sort_by(|a, b| {
            a.remaining_days
                .cmp(&b.remaining_days)
                .then_with(|| a.batch_id.cmp(&b.batch_id))
        });

        if !alerts.is_empty() {
            tracing::warn!(count = alerts.len(), "Batches close to expiry");
        }
        Ok(alerts)
    }
}
