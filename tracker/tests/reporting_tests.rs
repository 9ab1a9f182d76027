//! Dashboard analytics tests over the demo registry

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use agrovia_tracker::services::reporting::MAX_TREND_DAYS;
use agrovia_tracker::services::retail::BillLineInput;
use agrovia_tracker::{AppState, Config};
use shared::{DateRange, QualityGrade};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn seeded_state() -> AppState {
    AppState::new(Config::default(), today()).unwrap()
}

// =============================================================================
// Analytics
// =============================================================================

#[test]
fn demo_analytics_on_seed_day() {
    let state = seeded_state();
    let analytics = state.reporting().analytics(today(), None).unwrap();

    assert_eq!(analytics.total_batches, 8);
    assert_eq!(analytics.fresh_batches, 6);
    assert_eq!(analytics.consume_soon_batches, 0);
    assert_eq!(analytics.expired_batches, 2);
    assert_eq!(analytics.prevented_sales_count, 2);

    assert_eq!(analytics.total_quantity, Decimal::from(305));
    assert_eq!(analytics.expired_quantity, Decimal::from(45));
    assert_eq!(analytics.waste_rate_percent, Decimal::new(148, 1));
    assert_eq!(analytics.waste_prevented, Decimal::ZERO);
    assert_eq!(analytics.potential_waste_prevented, 0);

    assert_eq!(analytics.grade_stats.a, 4);
    assert_eq!(analytics.grade_stats.b, 3);
    assert_eq!(analytics.grade_stats.c, 1);
}

#[test]
fn analytics_moves_with_the_calendar() {
    let state = seeded_state();

    // Eight days on, tomato, potato and mango each have 2 days left
    let later = today() + Duration::days(8);
    let analytics = state.reporting().analytics(later, None).unwrap();

    assert_eq!(analytics.consume_soon_batches, 3);
    assert_eq!(analytics.fresh_batches, 3);
    // round(50 * 0.3) + round(30 * 0.3) + round(60 * 0.3)
    assert_eq!(analytics.waste_prevented, Decimal::from(42));
    // round(3 * 0.3 * 25) = round(22.5)
    assert_eq!(analytics.potential_waste_prevented, 23);
}

#[test]
fn analytics_respects_harvest_range() {
    let state = seeded_state();
    let range = DateRange::last_days(today(), 3);
    let analytics = state.reporting().analytics(today(), Some(range)).unwrap();

    // three days back through today: mango (0), apple (1), tomato (2), banana (3)
    assert_eq!(analytics.total_batches, 4);
    assert_eq!(analytics.expired_batches, 1);
    assert_eq!(analytics.expired_quantity, Decimal::from(20));
}

#[test]
fn empty_registry_has_zero_waste_rate() {
    let config = Config {
        demo: agrovia_tracker::config::DemoConfig { seed: false },
        ..Config::default()
    };
    let state = AppState::new(config, today()).unwrap();
    let analytics = state.reporting().analytics(today(), None).unwrap();
    assert_eq!(analytics.total_batches, 0);
    assert_eq!(analytics.waste_rate_percent, Decimal::ZERO);
}

// =============================================================================
// Revenue and farmer reports
// =============================================================================

#[test]
fn revenue_by_grade_in_grade_order() {
    let state = seeded_state();
    let rows = state.reporting().revenue_by_grade(today(), None).unwrap();

    let grades: Vec<_> = rows.iter().map(|r| r.grade).collect();
    assert_eq!(grades, vec![QualityGrade::A, QualityGrade::B, QualityGrade::C]);

    // A: tomato 50*48 + spinach 25*72 + apple 40*144 + mango 60*180
    assert_eq!(rows[0].revenue, Decimal::from(20760));
    // B: potato 30*30 + carrot 35*45 + onion 45*35
    assert_eq!(rows[1].revenue, Decimal::from(4050));
    // C: banana 20*35
    assert_eq!(rows[2].revenue, Decimal::from(700));
    assert_eq!(rows[0].label, "Grade A (Premium)");
}

#[test]
fn revenue_by_product_highest_first() {
    let state = seeded_state();
    let rows = state.reporting().revenue_by_product(today(), None).unwrap();

    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].product_id, "mango");
    assert_eq!(rows[0].revenue, Decimal::from(10800));
    assert_eq!(rows[1].product_id, "apple");
    assert!(rows.windows(2).all(|w| w[0].revenue >= w[1].revenue));
}

#[test]
fn farmer_leaderboard_by_quality_score() {
    let state = seeded_state();
    let rows = state.reporting().farmer_performance(today(), None).unwrap();

    let summary: Vec<_> = rows
        .iter()
        .map(|r| (r.farmer_id.as_str(), r.total_batches, r.quality_score))
        .collect();
    // F001: A, A, B; F002: B, B, A; F003: A, C
    assert_eq!(summary, vec![("F001", 3, 90), ("F002", 3, 80), ("F003", 2, 70)]);
    assert_eq!(rows[0].total_quantity, Decimal::from(120));
}

// =============================================================================
// Bill takings and daily trend
// =============================================================================

mod takings {
    use super::*;

    /// Bills are stamped with the wall clock, so these run on the real date
    fn live_today() -> NaiveDate {
        chrono::Utc::now().date_naive()
    }

    fn live_state() -> AppState {
        AppState::new(Config::default(), live_today()).unwrap()
    }

    fn sell(state: &AppState, product_id: &str, quantity: i64) {
        let batch_id = state
            .batches()
            .list_batches(live_today())
            .unwrap()
            .into_iter()
            .find(|b| b.batch.crop_type == product_id)
            .map(|b| b.batch.batch_id)
            .unwrap();
        let line = BillLineInput {
            batch_id,
            crate_id: None,
            quantity: Decimal::from(quantity),
        };
        state.retail().create_bill(vec![line], live_today()).unwrap();
    }

    #[test]
    fn bill_revenue_totals_and_averages() {
        let state = live_state();
        sell(&state, "tomato", 1); // 48
        sell(&state, "carrot", 1); // 45

        let revenue = state.reporting().bill_revenue(None).unwrap();
        assert_eq!(revenue.bill_count, 2);
        assert_eq!(revenue.total_revenue, Decimal::from(93));
        // 46.5 rounds up
        assert_eq!(revenue.average_bill_value, 47);

        let this_week = state
            .reporting()
            .bill_revenue(Some(DateRange::last_days(live_today(), 7)))
            .unwrap();
        assert_eq!(this_week, revenue);
    }

    #[test]
    fn bill_revenue_outside_range_is_zero() {
        let state = live_state();
        sell(&state, "mango", 2);

        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        );
        let revenue = state.reporting().bill_revenue(Some(range)).unwrap();
        assert_eq!(revenue.bill_count, 0);
        assert_eq!(revenue.total_revenue, Decimal::ZERO);
        assert_eq!(revenue.average_bill_value, 0);
    }

    #[test]
    fn trend_buckets_harvests_by_day() {
        let state = live_state();
        let trend = state.reporting().daily_trend(live_today(), 7).unwrap();

        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, live_today() - Duration::days(6));
        assert_eq!(trend[6].date, live_today());
        // one demo batch per harvest day 0..=6; spinach (day 8) falls outside
        assert!(trend.iter().all(|d| d.batches == 1));
        assert_eq!(trend[0].quantity, Decimal::from(45));
        assert_eq!(trend[6].quantity, Decimal::from(60));
    }

    #[test]
    fn trend_is_capped_and_carries_todays_takings() {
        let state = live_state();
        sell(&state, "mango", 1); // 180

        let trend = state.reporting().daily_trend(live_today(), 30).unwrap();
        assert_eq!(trend.len(), MAX_TREND_DAYS as usize);
        assert_eq!(trend.iter().map(|d| d.batches).sum::<usize>(), 8);

        let (last, earlier) = trend.split_last().unwrap();
        assert_eq!(last.revenue, Decimal::from(180));
        assert!(earlier.iter().all(|d| d.revenue.is_zero()));

        assert_eq!(state.reporting().daily_trend(live_today(), 0).unwrap().len(), 1);
    }
}
