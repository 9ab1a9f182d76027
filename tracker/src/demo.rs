//! Demo farmers and batches used to populate a fresh registry

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use shared::{
    generate_batch_id, representative_inspection, shelf_life_rule, Batch, BatchWithDetails, Farmer, QrMapping,
    QualityGrade, QualityTest, RetailStatus, Storage, StorageType,
};

use crate::store::StoreState;

struct DemoBatch {
    farmer_id: &'static str,
    days_ago: i64,
    quantity: i64,
    grade: QualityGrade,
    storage_type: StorageType,
    product_id: &'static str,
}

const fn demo(
    farmer_id: &'static str,
    days_ago: i64,
    quantity: i64,
    grade: QualityGrade,
    storage_type: StorageType,
    product_id: &'static str,
) -> DemoBatch {
    DemoBatch {
        farmer_id,
        days_ago,
        quantity,
        grade,
        storage_type,
        product_id,
    }
}

const DEMO_BATCHES: &[DemoBatch] = &[
    demo("F001", 2, 50, QualityGrade::A, StorageType::Cold, "tomato"),
    demo("F002", 5, 30, QualityGrade::B, StorageType::Normal, "potato"),
    demo("F001", 8, 25, QualityGrade::A, StorageType::Normal, "spinach"),
    demo("F003", 1, 40, QualityGrade::A, StorageType::Cold, "apple"),
    demo("F002", 4, 35, QualityGrade::B, StorageType::Cold, "carrot"),
    demo("F003", 3, 20, QualityGrade::C, StorageType::Normal, "banana"),
    demo("F001", 6, 45, QualityGrade::B, StorageType::Cold, "onion"),
    demo("F002", 0, 60, QualityGrade::A, StorageType::Cold, "mango"),
];

pub fn demo_farmers() -> Vec<Farmer> {
    vec![
        Farmer::new("F001", "FRM-A1X", "Farmer A"),
        Farmer::new("F002", "FRM-B2Y", "Farmer B"),
        Farmer::new("F003", "FRM-C3Z", "Farmer C"),
    ]
}

fn demo_batch(entry: &DemoBatch, farmer: Option<&Farmer>, today: NaiveDate) -> BatchWithDetails {
    let now = Utc::now();
    let batch_id = generate_batch_id(now);
    let harvest_date = today - Duration::days(entry.days_ago);
    let storage = Storage::compute(
        &batch_id,
        entry.storage_type,
        harvest_date,
        harvest_date,
        entry.grade,
        entry.product_id,
    );
    let retail_status = RetailStatus::evaluate(&batch_id, storage.expiry_date, today);
    let (visual_quality, firmness) = representative_inspection(entry.grade);
    let quality_test = QualityTest::record(
        &batch_id,
        visual_quality,
        firmness,
        shelf_life_rule(entry.grade).normal,
        harvest_date,
    );

    BatchWithDetails {
        batch: Batch {
            batch_id: batch_id.clone(),
            crop_type: entry.product_id.to_string(),
            harvest_date,
            farmer_id: entry.farmer_id.to_string(),
            quantity: Decimal::from(entry.quantity),
            quality_grade: Some(entry.grade),
            created_at: now,
        },
        quality_test: Some(quality_test),
        storage: Some(storage),
        retail_status: Some(retail_status),
        qr_mapping: Some(QrMapping::for_batch(&batch_id, now)),
        farmer: farmer.cloned(),
    }
}

/// Replace the registry contents with the demo data set, dated relative to `today`
pub fn seed(state: &mut StoreState, today: NaiveDate) {
    state.clear();
    state.farmers = demo_farmers();

    for entry in DEMO_BATCHES {
        let batch = demo_batch(entry, state.farmer(entry.farmer_id), today);
        state.batches.push(batch);
    }

    tracing::info!(
        farmers = state.farmers.len(),
        batches = state.batches.len(),
        "Seeded demo data"
    );
}
