//! Freshness and pricing rule tests
//!
//! Covers the shelf-life table, the freshness step function and the grade
//! price ordering, with property checks over generated inputs.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use shared::{
    calculate_expiry_date, calculate_remaining_days, calculate_shelf_life,
    determine_freshness_status, grade_from_inspection, is_sale_allowed, product_price, Firmness,
    FreshnessStatus, QualityGrade, StorageType, PRODUCTS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn grade_strategy() -> impl Strategy<Value = QualityGrade> {
    prop_oneof![
        Just(QualityGrade::A),
        Just(QualityGrade::B),
        Just(QualityGrade::C),
    ]
}

fn storage_strategy() -> impl Strategy<Value = StorageType> {
    prop_oneof![Just(StorageType::Normal), Just(StorageType::Cold)]
}

fn firmness_strategy() -> impl Strategy<Value = Firmness> {
    prop_oneof![
        Just(Firmness::Low),
        Just(Firmness::Medium),
        Just(Firmness::High),
    ]
}

fn product_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(PRODUCTS.iter().map(|p| p.id).collect::<Vec<_>>())
}

// =============================================================================
// Worked examples
// =============================================================================

mod examples {
    use super::*;

    #[test]
    fn tomato_grade_a_cold_expires_after_twelve_days() {
        let expiry = calculate_expiry_date(date(2024, 1, 1), QualityGrade::A, StorageType::Cold, "tomato");
        assert_eq!(expiry, date(2024, 1, 13));
    }

    #[test]
    fn lettuce_grade_c_normal_expired_day_after_harvest() {
        let harvest = date(2024, 6, 10);
        assert_eq!(calculate_shelf_life(QualityGrade::C, StorageType::Normal, "lettuce"), 1);

        let expiry = calculate_expiry_date(harvest, QualityGrade::C, StorageType::Normal, "lettuce");
        let remaining = calculate_remaining_days(expiry, harvest + Duration::days(1));
        assert_eq!(remaining, 0);
        assert_eq!(determine_freshness_status(remaining), FreshnessStatus::Expired);
    }

    #[test]
    fn inspection_examples() {
        assert_eq!(grade_from_inspection(5, Firmness::High), QualityGrade::A);
        assert_eq!(grade_from_inspection(2, Firmness::Low), QualityGrade::C);
    }

    #[test]
    fn expiry_crosses_month_and_leap_day() {
        // potato B normal: 5 * 3.0 = 15 days
        let expiry = calculate_expiry_date(date(2024, 2, 20), QualityGrade::B, StorageType::Normal, "potato");
        assert_eq!(expiry, date(2024, 3, 6));
    }
}

// =============================================================================
// Property tests
// =============================================================================

mod properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Cold storage always outlasts normal storage for the base table
        #[test]
        fn prop_cold_outlasts_normal(grade in grade_strategy()) {
            let normal = calculate_shelf_life(grade, StorageType::Normal, "tomato");
            let cold = calculate_shelf_life(grade, StorageType::Cold, "tomato");
            prop_assert!(cold > normal);
        }

        /// Cold never shortens shelf life for any catalog product
        #[test]
        fn prop_cold_not_shorter_per_product(grade in grade_strategy(), product in product_strategy()) {
            let normal = calculate_shelf_life(grade, StorageType::Normal, product);
            let cold = calculate_shelf_life(grade, StorageType::Cold, product);
            prop_assert!(cold >= normal);
        }

        /// Fresher remaining days never give a more expired status
        #[test]
        fn prop_classification_monotonic(r1 in -30i64..60, r2 in -30i64..60) {
            let (hi, lo) = if r1 >= r2 { (r1, r2) } else { (r2, r1) };
            let hi_status = determine_freshness_status(hi);
            let lo_status = determine_freshness_status(lo);
            prop_assert!(hi_status.rank() >= lo_status.rank());
        }

        /// remaining <= 0 iff Expired iff sale not allowed
        #[test]
        fn prop_expired_equivalences(
            offset in 0i64..400,
            grade in grade_strategy(),
            storage in storage_strategy(),
            product in product_strategy(),
            elapsed in 0i64..60,
        ) {
            let harvest = date(2023, 1, 1) + Duration::days(offset);
            let expiry = calculate_expiry_date(harvest, grade, storage, product);
            let remaining = calculate_remaining_days(expiry, harvest + Duration::days(elapsed));
            let status = determine_freshness_status(remaining);

            prop_assert_eq!(remaining <= 0, status == FreshnessStatus::Expired);
            prop_assert_eq!(status == FreshnessStatus::Expired, !is_sale_allowed(status));
        }

        /// Later harvest never yields an earlier expiry
        #[test]
        fn prop_expiry_monotonic_in_harvest(
            offset in 0i64..400,
            gap in 0i64..30,
            grade in grade_strategy(),
            storage in storage_strategy(),
            product in product_strategy(),
        ) {
            let early = date(2023, 1, 1) + Duration::days(offset);
            let late = early + Duration::days(gap);
            prop_assert!(
                calculate_expiry_date(late, grade, storage, product)
                    >= calculate_expiry_date(early, grade, storage, product)
            );
        }

        /// Prices strictly decrease from A to C
        #[test]
        fn prop_price_ordered_by_grade(product in product_strategy()) {
            let a = product_price(product, QualityGrade::A);
            let b = product_price(product, QualityGrade::B);
            let c = product_price(product, QualityGrade::C);
            prop_assert!(a > b);
            prop_assert!(b > c);
        }

        /// Inspection grading follows the total score thresholds
        #[test]
        fn prop_inspection_thresholds(visual in 1u8..=5, firmness in firmness_strategy()) {
            let total = visual + firmness.score();
            let expected = if total >= 6 {
                QualityGrade::A
            } else if total >= 4 {
                QualityGrade::B
            } else {
                QualityGrade::C
            };
            prop_assert_eq!(grade_from_inspection(visual, firmness), expected);
        }
    }
}
