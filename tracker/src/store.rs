//! In-memory registry shared by the services

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use shared::{Bill, BatchWithDetails, Crate, Farmer, InventoryRecord, Order};

use crate::error::{AppError, AppResult};

/// Everything the tracker knows about
#[derive(Debug, Default)]
pub struct StoreState {
    pub farmers: Vec<Farmer>,
    pub batches: Vec<BatchWithDetails>,
    pub orders: Vec<Order>,
    pub crates: Vec<Crate>,
    pub bills: Vec<Bill>,
    pub inventory: Vec<InventoryRecord>,
}

impl StoreState {
    /// Batch ids are matched case-insensitively, as typed at the counter
    pub fn batch(&self, batch_id: &str) -> Option<&BatchWithDetails> {
        self.batches
            .iter()
            .find(|b| b.batch.batch_id.eq_ignore_ascii_case(batch_id.trim()))
    }

    pub fn batch_mut(&mut self, batch_id: &str) -> Option<&mut BatchWithDetails> {
        self.batches
            .iter_mut()
            .find(|b| b.batch.batch_id.eq_ignore_ascii_case(batch_id.trim()))
    }

    pub fn farmer(&self, farmer_id: &str) -> Option<&Farmer> {
        self.farmers.iter().find(|f| f.farmer_id == farmer_id)
    }

    pub fn sold_quantity(&self, batch_id: &str) -> rust_decimal::Decimal {
        self.inventory
            .iter()
            .find(|r| r.batch_id == batch_id)
            .map(|r| r.sold_quantity)
            .unwrap_or_default()
    }

    /// Quantity of a batch already packed into crates
    pub fn packed_quantity(&self, batch_id: &str) -> rust_decimal::Decimal {
        self.crates
            .iter()
            .filter(|c| c.batch_id == batch_id)
            .map(|c| c.quantity)
            .sum()
    }

    pub fn crate_for_batch(&self, crate_id: &str, batch_id: &str) -> Option<&Crate> {
        self.crates
            .iter()
            .find(|c| c.crate_id.eq_ignore_ascii_case(crate_id.trim()) && c.batch_id == batch_id)
    }

    pub fn clear(&mut self) {
        *self = StoreState::default();
    }
}

/// Cloneable handle to the shared registry
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> AppResult<RwLockReadGuard<'_, StoreState>> {
        self.inner
            .read()
            .map_err(|_| AppError::StorageError("registry lock poisoned".to_string()))
    }

    pub fn write(&self) -> AppResult<RwLockWriteGuard<'_, StoreState>> {
        self.inner
            .write()
            .map_err(|_| AppError::StorageError("registry lock poisoned".to_string()))
    }
}
