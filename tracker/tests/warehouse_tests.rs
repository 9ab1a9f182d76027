//! Warehouse stock board and expiry alert tests

use chrono::{Duration, NaiveDate};

use agrovia_tracker::services::warehouse::{AlertLevel, StockFilter};
use agrovia_tracker::{AppState, Config};
use shared::FreshnessStatus;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn seeded_state() -> AppState {
    AppState::new(Config::default(), today()).unwrap()
}

// =============================================================================
// Stock board
// =============================================================================

mod stock_board {
    use super::*;

    #[test]
    fn board_lists_soonest_expiry_first() {
        let state = seeded_state();
        let rows = state.warehouse().stock_board(today(), &StockFilter::default()).unwrap();

        let remaining: Vec<i64> = rows
            .iter()
            .map(|b| b.retail_status.as_ref().unwrap().remaining_days)
            .collect();
        assert_eq!(remaining, vec![-4, -1, 10, 10, 10, 14, 17, 23]);
        assert_eq!(rows[0].batch.crop_type, "spinach");
    }

    #[test]
    fn board_filters_by_status() {
        let state = seeded_state();
        let filter = StockFilter {
            status: Some(FreshnessStatus::Expired),
            search: None,
        };
        let rows = state.warehouse().stock_board(today(), &filter).unwrap();
        let products: Vec<_> = rows.iter().map(|b| b.batch.crop_type.as_str()).collect();
        assert_eq!(products, vec!["spinach", "banana"]);
    }

    #[test]
    fn board_searches_batch_ids_ignoring_case() {
        let state = seeded_state();
        let all = state.warehouse().stock_board(today(), &StockFilter::default()).unwrap();
        let wanted = all[3].batch.batch_id.clone();

        let filter = StockFilter {
            status: None,
            search: Some(wanted.to_lowercase()),
        };
        let rows = state.warehouse().stock_board(today(), &filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].batch.batch_id, wanted);

        let blank = StockFilter {
            status: None,
            search: Some("  ".to_string()),
        };
        assert_eq!(state.warehouse().stock_board(today(), &blank).unwrap().len(), 8);
    }
}

// =============================================================================
// Expiry alerts
// =============================================================================

mod alerts {
    use super::*;

    #[test]
    fn no_alerts_on_seed_day() {
        let state = seeded_state();
        assert!(state.warehouse().expiry_alerts(today()).unwrap().is_empty());
    }

    #[test]
    fn warnings_two_days_out() {
        let state = seeded_state();
        // tomato, potato and mango all have 2 days left
        let alerts = state.warehouse().expiry_alerts(today() + Duration::days(8)).unwrap();

        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| a.level == AlertLevel::Warning));
        assert!(alerts.iter().all(|a| a.remaining_days == 2));
        assert_eq!(
            alerts[0].message,
            format!("Warning: {} expires in 2 days", alerts[0].batch_id)
        );
    }

    #[test]
    fn urgent_on_last_sellable_day() {
        let state = seeded_state();
        let alerts = state.warehouse().expiry_alerts(today() + Duration::days(9)).unwrap();

        assert_eq!(alerts.len(), 3);
        assert!(alerts.iter().all(|a| a.level == AlertLevel::Urgent));
        assert_eq!(
            alerts[0].message,
            format!("URGENT: {} expires tomorrow!", alerts[0].batch_id)
        );
    }

    #[test]
    fn expired_batches_raise_no_alert() {
        let state = seeded_state();
        // day 10: tomato, potato and mango reach 0 and are expired
        let alerts = state.warehouse().expiry_alerts(today() + Duration::days(10)).unwrap();
        assert!(alerts.is_empty());
    }

    #[test]
    fn alerts_follow_each_batch_to_expiry() {
        let state = seeded_state();
        let alerts_on = |day: i64| -> Vec<(String, i64)> {
            state
                .warehouse()
                .expiry_alerts(today() + Duration::days(day))
                .unwrap()
                .into_iter()
                .map(|a| (a.product_name, a.remaining_days))
                .collect()
        };

        // carrot 2, onion 5
        assert_eq!(alerts_on(12), vec![("Carrot".to_string(), 2)]);
        // carrot 0, onion 3
        assert_eq!(alerts_on(14), vec![("Onion".to_string(), 3)]);
    }

    #[test]
    fn alerts_sorted_by_days_left() {
        let state = seeded_state();
        let alerts = state.warehouse().expiry_alerts(today() + Duration::days(8)).unwrap();

        let mut ids: Vec<_> = alerts.iter().map(|a| a.batch_id.clone()).collect();
        let listed = ids.clone();
        ids.sort();
        assert_eq!(listed, ids);
    }

    #[test]
    fn unseeded_store_raises_no_alert() {
        let config = Config {
            demo: agrovia_tracker::config::DemoConfig { seed: false },
            ..Config::default()
        };
        let state = AppState::new(config, today()).unwrap();
        assert!(state.warehouse().expiry_alerts(today()).unwrap().is_empty());
    }
}
