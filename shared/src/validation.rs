//! Validation utilities for the Agrovia platform

use rust_decimal::Decimal;

use crate::models::{product_by_id, BILL_CODE_LENGTH, MAX_VISUAL_QUALITY, MIN_VISUAL_QUALITY};

// ============================================================================
// Produce Validations
// ============================================================================

/// Validate visual quality score is within 1-5
pub fn validate_visual_quality(score: u8) -> Result<(), &'static str> {
    if !(MIN_VISUAL_QUALITY..=MAX_VISUAL_QUALITY).contains(&score) {
        return Err("Visual quality must be between 1 and 5");
    }
    Ok(())
}

/// Validate a quantity is strictly positive
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a product id is in the catalog
pub fn validate_product_id(product_id: &str) -> Result<(), &'static str> {
    if product_by_id(product_id).is_none() {
        return Err("Unknown product");
    }
    Ok(())
}

// ============================================================================
// Identifier Validations
// ============================================================================

/// Validate farmer name is not blank
pub fn validate_farmer_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Farmer name cannot be empty");
    }
    Ok(())
}

/// Validate batch id format: BTH-{base36}-{4 alphanumerics}
pub fn validate_batch_id(batch_id: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = batch_id.split('-').collect();
    if parts.len() != 3 || parts[0] != "BTH" {
        return Err("Batch id must be in format BTH-XXXX-XXXX");
    }
    let alnum = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !alnum(parts[1]) || !alnum(parts[2]) || parts[2].len() != 4 {
        return Err("Invalid characters in batch id");
    }
    Ok(())
}

/// Validate bill code: eight alphanumerics, any case
pub fn validate_bill_code(code: &str) -> Result<(), &'static str> {
    if code.len() != BILL_CODE_LENGTH {
        return Err("Bill code must be 8 characters");
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Bill code must be alphanumeric");
    }
    Ok(())
}
