//! Dashboard analytics and reports

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use shared::{product_by_id, product_price, BatchWithDetails, DateRange, FreshnessStatus, QualityGrade};

use crate::config::AnalyticsConfig;
use crate::error::AppResult;
use crate::store::Store;

/// Reporting service computing analytics over the registry
#[derive(Clone)]
pub struct ReportingService {
    store: Store,
    settings: AnalyticsConfig,
}

/// Count of batches per grade
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GradeStats {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl GradeStats {
    fn add(&mut self, grade: QualityGrade) {
        match grade {
            QualityGrade::A => self.a += 1,
            QualityGrade::B => self.b += 1,
            QualityGrade::C => self.c += 1,
        }
    }
}

/// Headline dashboard figures
#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub total_batches: usize,
    pub fresh_batches: usize,
    pub consume_soon_batches: usize,
    pub expired_batches: usize,
    pub total_quantity: Decimal,
    pub expired_quantity: Decimal,
    /// Expired share of total quantity, percent with one decimal
    pub waste_rate_percent: Decimal,
    /// Estimated kg saved across consume-soon batches
    pub waste_prevented: Decimal,
    /// Dashboard estimate based on the average batch weight
    pub potential_waste_prevented: i64,
    pub grade_stats: GradeStats,
    /// Expired batches blocked from sale
    pub prevented_sales_count: usize,
}

/// Revenue attributed to one grade
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GradeRevenue {
    pub grade: QualityGrade,
    pub label: &'static str,
    pub revenue: Decimal,
}

/// Revenue and volume per product
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductRevenue {
    pub product_id: String,
    pub name: String,
    pub revenue: Decimal,
    pub quantity: Decimal,
    pub grades: GradeStats,
}

/// Per-farmer quality and revenue summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FarmerPerformance {
    pub farmer_id: String,
    pub name: String,
    pub total_batches: usize,
    pub grades: GradeStats,
    pub total_quantity: Decimal,
    pub revenue: Decimal,
    /// Weighted grade score: A=100, B=70, C=40, averaged over all batches
    pub quality_score: i64,
}

/// Takings from bills issued in a period
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BillRevenue {
    pub bill_count: usize,
    pub total_revenue: Decimal,
    /// Whole-unit average, zero without bills
    pub average_bill_value: i64,
}

/// Harvest volume and takings for one calendar day
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub batches: usize,
    pub quantity: Decimal,
    pub revenue: Decimal,
}

/// Longest daily trend the dashboard draws
pub const MAX_TREND_DAYS: u32 = 14;

fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Revenue of a graded batch at its grade price, zero when untested
fn batch_revenue(batch: &BatchWithDetails) -> Option<(QualityGrade, Decimal)> {
    let grade = batch.batch.quality_grade?;
    let price = product_price(&batch.batch.crop_type, grade);
    Some((grade, batch.batch.quantity * Decimal::from(price)))
}

impl ReportingService {
    pub fn new(store: Store, settings: AnalyticsConfig) -> Self {
        Self { store, settings }
    }

    /// Batches evaluated on `today`, optionally limited to a harvest range
    fn batches(&self, today: NaiveDate, range: Option<DateRange>) -> AppResult<Vec<BatchWithDetails>> {
        let state = self.store.read()?;
        Ok(state
            .batches
            .iter()
            .filter(|b| range.map_or(true, |r| r.contains(b.batch.harvest_date)))
            .cloned()
            .map(|b| b.refreshed(today))
            .collect())
    }

    /// Headline figures for the dashboard
    pub fn analytics(&self, today: NaiveDate, range: Option<DateRange>) -> AppResult<Analytics> {
        let batches = self.batches(today, range)?;
        let with_status = |status: FreshnessStatus| {
            batches
                .iter()
                .filter(move |b| b.status() == Some(status))
        };

        let expired: Vec<_> = with_status(FreshnessStatus::Expired).collect();
        let consume_soon: Vec<_> = with_status(FreshnessStatus::ConsumeSoon).collect();
        let fresh_batches = with_status(FreshnessStatus::Fresh).count();

        let total_quantity: Decimal = batches.iter().map(|b| b.batch.quantity).sum();
        let expired_quantity: Decimal = expired.iter().map(|b| b.batch.quantity).sum();
        let waste_rate_percent = if total_quantity > Decimal::ZERO {
            round_to(expired_quantity / total_quantity * Decimal::ONE_HUNDRED, 1)
        } else {
            Decimal::ZERO
        };

        let rate = self.settings.waste_prevention_rate;
        let waste_prevented: Decimal = consume_soon
            .iter()
            .map(|b| round_to(b.batch.quantity * rate, 0))
            .sum();
        let potential_waste_prevented = round_to(
            Decimal::from(consume_soon.len()) * rate * self.settings.average_batch_kg,
            0,
        )
        .to_i64()
        .unwrap_or(0);

        let mut grade_stats = GradeStats::default();
        for grade in batches.iter().filter_map(|b| b.batch.quality_grade) {
            grade_stats.add(grade);
        }

        tracing::debug!(total = batches.len(), expired = expired.len(), "Computed analytics");

        Ok(Analytics {
            total_batches: batches.len(),
            fresh_batches,
            consume_soon_batches: consume_soon.len(),
            expired_batches: expired.len(),
            total_quantity,
            expired_quantity,
            waste_rate_percent,
            waste_prevented,
            potential_waste_prevented,
            grade_stats,
            prevented_sales_count: expired.len(),
        })
    }

    /// Revenue per grade, in A, B, C order
    pub fn revenue_by_grade(&self, today: NaiveDate, range: Option<DateRange>) -> AppResult<Vec<GradeRevenue>> {
        let mut totals: HashMap<QualityGrade, Decimal> = HashMap::new();
        for (grade, revenue) in self.batches(today, range)?.iter().filter_map(batch_revenue) {
            *totals.entry(grade).or_default() += revenue;
        }
        Ok(QualityGrade::ALL
            .iter()
            .map(|g| GradeRevenue {
                grade: *g,
                label: g.label(),
                revenue: totals.get(g).copied().unwrap_or_default(),
            })
            .collect())
    }

    /// Revenue per catalog product, highest first
    pub fn revenue_by_product(&self, today: NaiveDate, range: Option<DateRange>) -> AppResult<Vec<ProductRevenue>> {
        let mut by_product: HashMap<&'static str, ProductRevenue> = HashMap::new();
        for batch in self.batches(today, range)? {
            let Some((grade, revenue)) = batch_revenue(&batch) else {
                continue;
            };
            let Some(product) = product_by_id(&batch.batch.crop_type) else {
                continue;
            };
            let entry = by_product.entry(product.id).or_insert_with(|| ProductRevenue {
                product_id: product.id.to_string(),
                name: product.name.to_string(),
                revenue: Decimal::ZERO,
                quantity: Decimal::ZERO,
                grades: GradeStats::default(),
            });
            entry.revenue += revenue;
            entry.quantity += batch.batch.quantity;
            entry.grades.add(grade);
        }

        let mut rows: Vec<_> = by_product.into_values().collect();
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
        Ok(rows)
    }

    /// Farmer leaderboard, best quality score first
    pub fn farmer_performance(&self, today: NaiveDate, range: Option<DateRange>) -> AppResult<Vec<FarmerPerformance>> {
        let farmers = self.store.read()?.farmers.clone();
        let batches = self.batches(today, range)?;

        let mut rows: Vec<FarmerPerformance> = farmers
            .into_iter()
            .map(|farmer| {
                let own: Vec<&BatchWithDetails> = batches
                    .iter()
                    .filter(|b| b.batch.farmer_id == farmer.farmer_id)
                    .collect();

                let mut grades = GradeStats::default();
                let mut revenue = Decimal::ZERO;
                for (grade, amount) in own.iter().filter_map(|b| batch_revenue(b)) {
                    grades.add(grade);
                    revenue += amount;
                }

                let quality_score = if own.is_empty() {
                    0
                } else {
                    let weighted = grades.a * 100 + grades.b * 70 + grades.c * 40;
                    round_to(Decimal::from(weighted) / Decimal::from(own.len()), 0)
                        .to_i64()
                        .unwrap_or(0)
                };

                FarmerPerformance {
                    farmer_id: farmer.farmer_id,
                    name: farmer.name,
                    total_batches: own.len(),
                    grades,
                    total_quantity: own.iter().map(|b| b.batch.quantity).sum(),
                    revenue,
                    quality_score,
                }
            })
            .collect();

        rows.sort_by(|a, b| b.quality_score.cmp(&a.quality_score));
        Ok(rows)
    }

    /// Revenue from bills issued within `range` (by UTC issue date)
    pub fn bill_revenue(&self, range: Option<DateRange>) -> AppResult<BillRevenue> {
        let state = self.store.read()?;
        let totals: Vec<Decimal> = state
            .bills
            .iter()
            .filter(|b| range.map_or(true, |r| r.contains(b.created_at.date_naive())))
            .map(|b| b.total_amount)
            .collect();

        let total_revenue: Decimal = totals.iter().copied().sum();
        let average_bill_value = if totals.is_empty() {
            0
        } else {
            round_to(total_revenue / Decimal::from(totals.len()), 0)
                .to_i64()
                .unwrap_or(0)
        };

        Ok(BillRevenue {
            bill_count: totals.len(),
            total_revenue,
            average_bill_value,
        })
    }

    /// Per-day harvest volume and bill takings for the last `days` days
    /// (at most [`MAX_TREND_DAYS`]), oldest first
    pub fn daily_trend(&self, today: NaiveDate, days: u32) -> AppResult<Vec<DailyTrend>> {
        let state = self.store.read()?;
        let days = days.clamp(1, MAX_TREND_DAYS);

        Ok((0..i64::from(days))
            .rev()
            .map(|offset| {
                let date = today - Duration::days(offset);
                let harvested: Vec<_> = state
                    .batches
                    .iter()
                    .filter(|b| b.batch.harvest_date == date)
                    .collect();
                DailyTrend {
                    date,
                    batches: harvested.len(),
                    quantity: harvested.iter().map(|b| b.batch.quantity).sum(),
                    revenue: state
                        .bills
                        .iter()
                        .filter(|b| b.created_at.date_naive() == date)
                        .map(|b| b.total_amount)
                        .sum(),
                }
            })
            .collect())
    }
}
