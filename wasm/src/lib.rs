//! WebAssembly module for the Agrovia produce tracking platform
//!
//! Provides client-side computation for:
//! - Shelf life and expiry dates
//! - Freshness classification and the sale gate
//! - Inspection grading and grade pricing
//! - Product catalog lookups
//!
//! Enumerations cross the boundary as strings ("A", "Cold", "High") and
//! dates as ISO `YYYY-MM-DD`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    calculate_expiry_date, calculate_remaining_days, calculate_shelf_life,
    determine_freshness_status, grade_from_inspection, is_sale_allowed, legacy_price_per_kg,
    product_price, search_products, validate_visual_quality, Firmness, Product, ProductCategory,
    QualityGrade, StorageType,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("agrovia-wasm ready"));
}

/// Catalog entry as exposed to the browser
#[derive(Debug, Serialize)]
struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    category: ProductCategory,
    unit: &'static str,
    base_price: i64,
    shelf_life_modifier: Decimal,
}

impl From<&Product> for CatalogEntry {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            category: product.category,
            unit: product.unit,
            base_price: product.base_price,
            shelf_life_modifier: product.shelf_life_modifier(),
        }
    }
}

fn parse_grade(grade: &str) -> Result<QualityGrade, String> {
    grade.parse().map_err(|e: shared::ParseEnumError| e.to_string())
}

fn parse_storage(storage_type: &str) -> Result<StorageType, String> {
    storage_type.parse().map_err(|e: shared::ParseEnumError| e.to_string())
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", date, e))
}

fn shelf_life(grade: &str, storage_type: &str, product_id: &str) -> Result<i64, String> {
    Ok(calculate_shelf_life(parse_grade(grade)?, parse_storage(storage_type)?, product_id))
}

fn expiry_date(harvest_date: &str, grade: &str, storage_type: &str, product_id: &str) -> Result<NaiveDate, String> {
    Ok(calculate_expiry_date(
        parse_date(harvest_date)?,
        parse_grade(grade)?,
        parse_storage(storage_type)?,
        product_id,
    ))
}

fn remaining_days(expiry_date: &str, today: &str) -> Result<i64, String> {
    Ok(calculate_remaining_days(parse_date(expiry_date)?, parse_date(today)?))
}

fn inspection_grade(visual_quality: u8, firmness: &str) -> Result<QualityGrade, String> {
    validate_visual_quality(visual_quality)?;
    let firmness: Firmness = firmness.parse().map_err(|e: shared::ParseEnumError| e.to_string())?;
    Ok(grade_from_inspection(visual_quality, firmness))
}

fn catalog_json(query: &str) -> Result<String, String> {
    let entries: Vec<CatalogEntry> = search_products(query).into_iter().map(CatalogEntry::from).collect();
    serde_json::to_string(&entries).map_err(|e| e.to_string())
}

/// Browser-local calendar date
fn local_today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

/// Shelf life in whole days for a grade, storage type and product
#[wasm_bindgen]
pub fn shelf_life_days(grade: &str, storage_type: &str, product_id: &str) -> Result<i32, JsValue> {
    shelf_life(grade, storage_type, product_id)
        .map(|days| days as i32)
        .map_err(|e| JsValue::from_str(&e))
}

/// Expiry date (ISO) of a batch harvested on `harvest_date`
#[wasm_bindgen]
pub fn expiry_date_iso(harvest_date: &str, grade: &str, storage_type: &str, product_id: &str) -> Result<String, JsValue> {
    expiry_date(harvest_date, grade, storage_type, product_id)
        .map(|d| d.to_string())
        .map_err(|e| JsValue::from_str(&e))
}

/// Days from `today` until `expiry_date`, negative once passed
#[wasm_bindgen]
pub fn remaining_days_between(expiry_date: &str, today: &str) -> Result<i32, JsValue> {
    remaining_days(expiry_date, today)
        .map(|days| days as i32)
        .map_err(|e| JsValue::from_str(&e))
}

/// Days until `expiry_date` counted from the browser's local date
#[wasm_bindgen]
pub fn remaining_days_from_today(expiry_date: &str) -> Result<i32, JsValue> {
    let today = local_today().ok_or_else(|| JsValue::from_str("Invalid local date"))?;
    let expiry = parse_date(expiry_date).map_err(|e| JsValue::from_str(&e))?;
    Ok(calculate_remaining_days(expiry, today) as i32)
}

/// Freshness status label for a remaining day count
#[wasm_bindgen]
pub fn freshness_status(remaining_days: i32) -> String {
    determine_freshness_status(i64::from(remaining_days)).to_string()
}

/// Consumer-facing message for a remaining day count
#[wasm_bindgen]
pub fn freshness_message(remaining_days: i32) -> String {
    determine_freshness_status(i64::from(remaining_days))
        .consumer_message()
        .to_string()
}

/// Whether a batch with this many days left may be sold
#[wasm_bindgen]
pub fn sale_allowed(remaining_days: i32) -> bool {
    is_sale_allowed(determine_freshness_status(i64::from(remaining_days)))
}

/// Grade derived from a 1-5 visual score and a firmness level
#[wasm_bindgen]
pub fn grade_inspection(visual_quality: u8, firmness: &str) -> Result<String, JsValue> {
    inspection_grade(visual_quality, firmness)
        .map(|g| g.to_string())
        .map_err(|e| JsValue::from_str(&e))
}

/// Per-unit price of a product at a grade
#[wasm_bindgen]
pub fn grade_price(product_id: &str, grade: &str) -> Result<i32, JsValue> {
    let grade = parse_grade(grade).map_err(|e| JsValue::from_str(&e))?;
    Ok(product_price(product_id, grade) as i32)
}

/// Flat per-kg price from the old price board
#[wasm_bindgen]
pub fn legacy_grade_price(grade: &str) -> Result<i32, JsValue> {
    let grade = parse_grade(grade).map_err(|e| JsValue::from_str(&e))?;
    Ok(legacy_price_per_kg(grade) as i32)
}

/// Catalog entries matching `query` as a JSON array; empty query lists all
#[wasm_bindgen]
pub fn product_catalog(query: &str) -> Result<String, JsValue> {
    catalog_json(query).map_err(|e| JsValue::from_str(&e))
}
