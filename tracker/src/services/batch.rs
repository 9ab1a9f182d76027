//! Farmer registry and batch intake service

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use shared::{
    generate_batch_id, generate_farmer_code, generate_farmer_id, validate_farmer_name,
    validate_product_id, Batch, BatchWithDetails, Farmer, QrMapping, QualityGrade, RetailStatus,
    Storage, StorageType,
};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Grade assumed for storage and retail status until a batch is tested
pub const PROVISIONAL_GRADE: QualityGrade = QualityGrade::B;

/// Batch service for intake and batch queries
#[derive(Clone)]
pub struct BatchService {
    store: Store,
}

/// Input for registering a farmer
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFarmerInput {
    #[validate(length(min = 1, max = 100, message = "Farmer name must be 1-100 characters"))]
    pub name: String,
}

/// Input for receiving a batch at intake
#[derive(Debug, Deserialize, Validate)]
pub struct IntakeInput {
    #[validate(length(min = 1, message = "Farmer is required"))]
    pub farmer_id: String,
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    #[validate(custom = "validate_positive_quantity")]
    pub quantity: Decimal,
    #[serde(default)]
    pub storage_type: StorageType,
    /// Defaults to the intake day
    pub harvest_date: Option<NaiveDate>,
}

pub(crate) fn validate_positive_quantity(quantity: &Decimal) -> Result<(), ValidationError> {
    shared::validate_quantity(*quantity).map_err(|msg| {
        let mut err = ValidationError::new("positive");
        err.message = Some(msg.into());
        err
    })
}

impl BatchService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// List all registered farmers
    pub fn list_farmers(&self) -> AppResult<Vec<Farmer>> {
        Ok(self.store.read()?.farmers.clone())
    }

    /// Register a farmer with the next sequential id
    pub fn register_farmer(&self, input: RegisterFarmerInput) -> AppResult<Farmer> {
        input.validate()?;
        validate_farmer_name(&input.name).map_err(|msg| AppError::invalid("name", msg))?;

        let mut state = self.store.write()?;
        let farmer = Farmer::new(
            generate_farmer_id(state.farmers.len() + 1),
            generate_farmer_code(),
            input.name.trim(),
        );
        state.farmers.push(farmer.clone());

        tracing::info!(farmer_id = %farmer.farmer_id, "Registered farmer {}", farmer.name);
        Ok(farmer)
    }

    /// Receive an ungraded batch.
    ///
    /// Storage and retail status are computed with [`PROVISIONAL_GRADE`] until
    /// the batch is quality tested.
    pub fn intake(&self, input: IntakeInput, today: NaiveDate) -> AppResult<BatchWithDetails> {
        input.validate()?;
        validate_product_id(&input.product_id).map_err(|msg| AppError::invalid("product_id", msg))?;

        let mut state = self.store.write()?;
        let farmer = state
            .farmer(&input.farmer_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Farmer {}", input.farmer_id)))?;

        let now = Utc::now();
        let batch_id = generate_batch_id(now);
        let harvest_date = input.harvest_date.unwrap_or(today);
        let storage = Storage::compute(
            &batch_id,
            input.storage_type,
            today,
            harvest_date,
            PROVISIONAL_GRADE,
            &input.product_id,
        );
        let retail_status = RetailStatus::evaluate(&batch_id, storage.expiry_date, today);

        let details = BatchWithDetails {
            batch: Batch {
                batch_id: batch_id.clone(),
                crop_type: input.product_id,
                harvest_date,
                farmer_id: farmer.farmer_id.clone(),
                quantity: input.quantity,
                quality_grade: None,
                created_at: now,
            },
            quality_test: None,
            storage: Some(storage),
            retail_status: Some(retail_status),
            qr_mapping: Some(QrMapping::for_batch(&batch_id, now)),
            farmer: Some(farmer),
        };
        state.batches.push(details.clone());

        tracing::info!(
            batch_id = %batch_id,
            product = %details.batch.crop_type,
            quantity = %details.batch.quantity,
            "Batch received at intake"
        );
        Ok(details)
    }

    /// Get a batch with freshness evaluated on `today`
    pub fn get_batch(&self, batch_id: &str, today: NaiveDate) -> AppResult<BatchWithDetails> {
        tracing::debug!("Looking up batch {}", batch_id);
        let state = self.store.read()?;
        state
            .batch(batch_id)
            .cloned()
            .map(|b| b.refreshed(today))
            .ok_or_else(|| AppError::NotFound(format!("Batch {}", batch_id)))
    }

    /// All batches with freshness evaluated on `today`
    pub fn list_batches(&self, today: NaiveDate) -> AppResult<Vec<BatchWithDetails>> {
        let state = self.store.read()?;
        Ok(state
            .batches
            .iter()
            .cloned()
            .map(|b| b.refreshed(today))
            .collect())
    }

    /// Batches still waiting for a quality test
    pub fn list_untested(&self, today: NaiveDate) -> AppResult<Vec<BatchWithDetails>> {
        Ok(self
            .list_batches(today)?
            .into_iter()
            .filter(|b| !b.is_graded())
            .collect())
    }

    /// Drop all registry data and restore the demo data set
    pub fn reset(&self, today: NaiveDate) -> AppResult<()> {
        let mut state = self.store.write()?;
        crate::demo::seed(&mut state, today);
        tracing::info!("Registry reset to demo data");
        Ok(())
    }

    /// Graded batches that may still be sold on `today`
    pub fn list_sellable(&self, today: NaiveDate) -> AppResult<Vec<BatchWithDetails>> {
        Ok(self
            .list_batches(today)?
            .into_iter()
            .filter(|b| b.is_graded() && b.sale_allowed())
            .collect())
    }
}
