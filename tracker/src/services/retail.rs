//! Warehouse and retail service: orders, crates, bills and sold stock

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::{
    available_quantity, bill_total, generate_bill_id, generate_crate_id, generate_order_id,
    generate_unique_code, product_by_id, product_price, validate_bill_code, Bill, BillItem,
    BatchWithDetails, Crate, InventoryRecord, Order, OrderStatus, DEFAULT_BASE_PRICE,
};

use super::batch::validate_positive_quantity;
use crate::error::{AppError, AppResult};
use crate::store::{Store, StoreState};

/// Retail service for stock movements out of the warehouse
#[derive(Clone)]
pub struct RetailService {
    store: Store,
    retailer_id: String,
}

/// Quantity of a batch requested by an order, crate or bill line
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StockRequest {
    #[validate(length(min = 1, message = "Batch is required"))]
    pub batch_id: String,
    #[validate(custom = "validate_positive_quantity")]
    pub quantity: Decimal,
}

/// A line to put on a bill
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BillLineInput {
    #[validate(length(min = 1, message = "Batch is required"))]
    pub batch_id: String,
    pub crate_id: Option<String>,
    #[validate(custom = "validate_positive_quantity")]
    pub quantity: Decimal,
}

/// A bill line together with the batch it was sold from
#[derive(Debug, Clone, Serialize)]
pub struct BillLineDetails {
    #[serde(flatten)]
    pub item: BillItem,
    /// Batch with freshness evaluated on the lookup day
    pub batch: Option<BatchWithDetails>,
}

/// Customer view of a bill found by its printed code
#[derive(Debug, Clone, Serialize)]
pub struct BillLookup {
    pub bill_id: String,
    pub unique_code: String,
    pub total_amount: Decimal,
    pub created_at: chrono::DateTime<Utc>,
    pub items: Vec<BillLineDetails>,
}

impl RetailService {
    pub fn new(store: Store, retailer_id: impl Into<String>) -> Self {
        Self {
            store,
            retailer_id: retailer_id.into(),
        }
    }

    /// Quantity of a batch not yet sold
    pub fn available_quantity(&self, batch_id: &str) -> AppResult<Decimal> {
        let state = self.store.read()?;
        let batch = find_batch(&state, batch_id)?;
        Ok(available_quantity(
            batch.batch.quantity,
            state.sold_quantity(&batch.batch.batch_id),
        ))
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    /// Place a pending order against a graded, sellable batch
    pub fn place_order(&self, input: StockRequest, today: NaiveDate) -> AppResult<Order> {
        input.validate()?;
        let mut state = self.store.write()?;
        let batch = find_batch(&state, &input.batch_id)?.clone().refreshed(today);

        if !batch.is_graded() {
            return Err(AppError::NotGraded(batch.batch.batch_id));
        }
        ensure_sellable(&batch)?;
        let available = available_quantity(batch.batch.quantity, state.sold_quantity(&batch.batch.batch_id));
        ensure_available(&batch.batch.batch_id, input.quantity, available)?;

        let now = Utc::now();
        let order = Order {
            order_id: generate_order_id(now),
            retailer_id: self.retailer_id.clone(),
            batch_id: batch.batch.batch_id.clone(),
            quantity: input.quantity,
            order_date: now,
            status: OrderStatus::Pending,
        };
        state.orders.push(order.clone());

        tracing::info!(order_id = %order.order_id, batch_id = %order.batch_id, "Order placed");
        Ok(order)
    }

    /// Move a pending order to fulfilled or cancelled
    pub fn update_order_status(&self, order_id: &str, status: OrderStatus) -> AppResult<Order> {
        let mut state = self.store.write()?;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| AppError::NotFound(format!("Order {}", order_id)))?;

        if !order.status.can_transition_to(status) {
            return Err(AppError::InvalidStateTransition(format!(
                "order {} cannot move from {} to {}",
                order_id, order.status, status
            )));
        }
        order.status = status;

        tracing::info!(order_id = %order_id, status = %status, "Order status updated");
        Ok(order.clone())
    }

    pub fn list_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self.store.read()?.orders.clone())
    }

    pub fn pending_orders(&self) -> AppResult<Vec<Order>> {
        Ok(self
            .store
            .read()?
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------
    // Crates
    // ------------------------------------------------------------------

    /// Pack part of a batch into a crate.
    ///
    /// A crate may only take stock that is neither sold nor already packed.
    pub fn create_crate(&self, input: StockRequest) -> AppResult<Crate> {
        input.validate()?;
        let mut state = self.store.write()?;
        let batch = find_batch(&state, &input.batch_id)?;
        let batch_id = batch.batch.batch_id.clone();
        let unsold = available_quantity(batch.batch.quantity, state.sold_quantity(&batch_id));
        let unpacked = available_quantity(batch.batch.quantity, state.packed_quantity(&batch_id));
        ensure_available(&batch_id, input.quantity, unsold.min(unpacked))?;

        let now = Utc::now();
        let packed = Crate {
            crate_id: generate_crate_id(now),
            batch_id,
            quantity: input.quantity,
            created_at: now,
        };
        state.crates.push(packed.clone());

        tracing::info!(crate_id = %packed.crate_id, batch_id = %packed.batch_id, "Crate created");
        Ok(packed)
    }

    pub fn get_crate(&self, crate_id: &str) -> AppResult<Crate> {
        self.store
            .read()?
            .crates
            .iter()
            .find(|c| c.crate_id.eq_ignore_ascii_case(crate_id.trim()))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Crate {}", crate_id)))
    }

    pub fn list_crates(&self) -> AppResult<Vec<Crate>> {
        Ok(self.store.read()?.crates.clone())
    }

    // ------------------------------------------------------------------
    // Bills
    // ------------------------------------------------------------------

    /// Generate a bill and deduct the sold quantities from inventory.
    ///
    /// Every line is checked before anything is recorded, so a rejected bill
    /// leaves inventory untouched. Lines for the same batch draw from one
    /// shared availability.
    pub fn create_bill(&self, lines: Vec<BillLineInput>, today: NaiveDate) -> AppResult<Bill> {
        if lines.is_empty() {
            return Err(AppError::ValidationError("Add items to the bill first".to_string()));
        }

        let mut state = self.store.write()?;
        let mut items = Vec::with_capacity(lines.len());
        let mut requested: HashMap<String, Decimal> = HashMap::new();

        for line in lines {
            line.validate()?;
            let batch = find_batch(&state, &line.batch_id)?.clone().refreshed(today);
            let batch_id = batch.batch.batch_id.clone();
            ensure_sellable(&batch)?;

            let crate_id = match &line.crate_id {
                Some(crate_id) => Some(
                    state
                        .crate_for_batch(crate_id, &batch_id)
                        .map(|c| c.crate_id.clone())
                        .ok_or_else(|| AppError::NotFound(format!("Crate {} for batch {}", crate_id, batch_id)))?,
                ),
                None => None,
            };

            let already = requested.get(&batch_id).copied().unwrap_or_default();
            let available = available_quantity(batch.batch.quantity, state.sold_quantity(&batch_id)) - already;
            ensure_available(&batch_id, line.quantity, available.max(Decimal::ZERO))?;
            *requested.entry(batch_id.clone()).or_default() += line.quantity;

            let grade = batch.batch.quality_grade;
            let price_per_unit = grade
                .map(|g| product_price(&batch.batch.crop_type, g))
                .unwrap_or(DEFAULT_BASE_PRICE);
            let product_name = product_by_id(&batch.batch.crop_type)
                .map(|p| p.name)
                .unwrap_or("Produce");

            items.push(BillItem::new(
                batch_id,
                crate_id,
                line.quantity,
                grade,
                price_per_unit,
                Some(product_name.to_string()),
            ));
        }

        for (batch_id, quantity) in &requested {
            reduce_inventory(&mut state, batch_id, *quantity);
        }

        let now = Utc::now();
        let bill = Bill {
            bill_id: generate_bill_id(now),
            retailer_id: self.retailer_id.clone(),
            total_amount: bill_total(&items),
            items,
            created_at: now,
            unique_code: generate_unique_code(),
        };
        state.bills.push(bill.clone());

        tracing::info!(
            bill_id = %bill.bill_id,
            code = %bill.unique_code,
            total = %bill.total_amount,
            "Bill generated"
        );
        Ok(bill)
    }

    /// Find a bill by the code printed under its barcode
    pub fn find_bill_by_code(&self, code: &str) -> AppResult<Bill> {
        let code = code.trim();
        validate_bill_code(code).map_err(|msg| AppError::invalid("code", msg))?;
        self.store
            .read()?
            .bills
            .iter()
            .find(|b| b.unique_code.eq_ignore_ascii_case(code))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Bill {}", code)))
    }

    /// Find a bill by code and attach each line's batch as of `today`
    pub fn lookup_bill(&self, code: &str, today: NaiveDate) -> AppResult<BillLookup> {
        let bill = self.find_bill_by_code(code)?;
        let state = self.store.read()?;
        let items = bill
            .items
            .into_iter()
            .map(|item| {
                let batch = state.batch(&item.batch_id).cloned().map(|b| b.refreshed(today));
                BillLineDetails { item, batch }
            })
            .collect();

        tracing::debug!("Customer lookup of bill {}", bill.bill_id);
        Ok(BillLookup {
            bill_id: bill.bill_id,
            unique_code: bill.unique_code,
            total_amount: bill.total_amount,
            created_at: bill.created_at,
            items,
        })
    }

    pub fn list_bills(&self) -> AppResult<Vec<Bill>> {
        Ok(self.store.read()?.bills.clone())
    }
}

fn find_batch<'a>(state: &'a StoreState, batch_id: &str) -> AppResult<&'a BatchWithDetails> {
    state
        .batch(batch_id)
        .ok_or_else(|| AppError::NotFound(format!("Batch {}", batch_id)))
}

fn ensure_sellable(batch: &BatchWithDetails) -> AppResult<()> {
    if !batch.sale_allowed() {
        tracing::warn!("Blocked sale of expired batch {}", batch.batch.batch_id);
        return Err(AppError::SaleNotAllowed(batch.batch.batch_id.clone()));
    }
    Ok(())
}

fn ensure_available(batch_id: &str, requested: Decimal, available: Decimal) -> AppResult<()> {
    if requested > available {
        tracing::warn!("Only {} of batch {} available, {} requested", available, batch_id, requested);
        return Err(AppError::InsufficientInventory {
            batch_id: batch_id.to_string(),
            requested,
            available,
        });
    }
    Ok(())
}

fn reduce_inventory(state: &mut StoreState, batch_id: &str, quantity: Decimal) {
    match state.inventory.iter_mut().find(|r| r.batch_id == batch_id) {
        Some(record) => record.sold_quantity += quantity,
        None => state.inventory.push(InventoryRecord {
            batch_id: batch_id.to_string(),
            sold_quantity: quantity,
        }),
    }
}
