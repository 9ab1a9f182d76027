//! Grade-based pricing

use rust_decimal::Decimal;

use crate::freshness::round_whole;
use crate::models::base_price;
use crate::types::QualityGrade;

/// Price multiplier applied to the product base price
pub fn grade_multiplier(grade: QualityGrade) -> Decimal {
    match grade {
        QualityGrade::A => Decimal::new(12, 1),
        QualityGrade::B => Decimal::ONE,
        QualityGrade::C => Decimal::new(7, 1),
    }
}

/// Unit price for a product at a grade, rounded to a whole amount.
///
/// The product is exact and halves round away from zero, so carrot and
/// eggplant at grade C (45 * 0.7 = 31.5) price at 32. A binary float
/// evaluates 45 * 0.7 to 31.4999... and would give 31.
pub fn product_price(product_id: &str, grade: QualityGrade) -> i64 {
    round_whole(Decimal::from(base_price(product_id)) * grade_multiplier(grade))
}

/// Flat per-kg price used before per-product pricing existed
pub fn legacy_price_per_kg(grade: QualityGrade) -> i64 {
    match grade {
        QualityGrade::A => 12,
        QualityGrade::B => 9,
        QualityGrade::C => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PRODUCTS;

    #[test]
    fn test_tomato_prices() {
        assert_eq!(product_price("tomato", QualityGrade::A), 48);
        assert_eq!(product_price("tomato", QualityGrade::B), 40);
        assert_eq!(product_price("tomato", QualityGrade::C), 28);
    }

    #[test]
    fn test_unknown_product_uses_default_base() {
        assert_eq!(product_price("durian", QualityGrade::A), 60);
        assert_eq!(product_price("durian", QualityGrade::B), 50);
        assert_eq!(product_price("durian", QualityGrade::C), 35);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 45 * 0.7 = 31.5
        assert_eq!(product_price("carrot", QualityGrade::C), 32);
        // 25 * 0.7 = 17.5
        assert_eq!(product_price("cabbage", QualityGrade::C), 18);
    }

    #[test]
    fn test_grades_strictly_ordered_for_catalog() {
        for product in PRODUCTS {
            let a = product_price(product.id, QualityGrade::A);
            let b = product_price(product.id, QualityGrade::B);
            let c = product_price(product.id, QualityGrade::C);
            assert!(a > b && b > c, "{} not ordered: {} {} {}", product.id, a, b, c);
        }
    }

    #[test]
    fn test_legacy_prices() {
        assert_eq!(legacy_price_per_kg(QualityGrade::A), 12);
        assert_eq!(legacy_price_per_kg(QualityGrade::C), 6);
    }
}
