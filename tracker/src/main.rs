//! Agrovia Tracker - demo runner
//!
//! Loads configuration, seeds the registry and logs a freshness snapshot of
//! every batch along with the dashboard analytics.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agrovia_tracker::services::retail::BillLineInput;
use agrovia_tracker::{AppState, Config};

fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Agrovia tracker");
    tracing::info!("Environment: {}", config.environment);

    let today = shared::today();
    let state = AppState::new(config, today)?;

    for batch in state.batches().list_batches(today)? {
        let status = batch
            .retail_status
            .as_ref()
            .map(|r| format!("{} ({} days left)", r.status, r.remaining_days))
            .unwrap_or_else(|| "untracked".to_string());
        tracing::info!(
            batch_id = %batch.batch.batch_id,
            product = shared::product_name(&batch.batch.crop_type),
            grade = batch.batch.quality_grade.map(|g| g.as_str()).unwrap_or("untested"),
            "{}",
            status
        );
    }

    // Expired stock must be refused at the till
    let expired = state.batches().list_batches(today)?.into_iter().find(|b| !b.sale_allowed());
    if let Some(batch) = expired {
        let line = BillLineInput {
            batch_id: batch.batch.batch_id,
            crate_id: None,
            quantity: rust_decimal::Decimal::ONE,
        };
        if let Err(err) = state.retail().create_bill(vec![line], today) {
            tracing::info!("Sale refused: {}", serde_json::to_string(&err.detail())?);
        }
    }

    let analytics = state.reporting().analytics(today, None)?;
    tracing::info!("Dashboard: {}", serde_json::to_string(&analytics)?);

    Ok(())
}
