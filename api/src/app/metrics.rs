//! Metric derivation
//!
//! Stateless helpers shared by every aggregator. Every division goes through
//! [`safe_divide`], so no metric is ever NaN or infinite because of an empty
//! denominator. Rates and ratios are rounded to two decimals; raw sums are not.

use crate::domain::entities::LtvBucket;

/// Scale for percentage results
pub const PERCENT: f64 = 100.0;

/// Lifetime-spend boundaries: `< 100` Low, `< 500` Medium, otherwise High
pub const LTV_THRESHOLDS: [f64; 2] = [100.0, 500.0];

/// Stock offset used by the turnover heuristic's average-inventory estimate
pub const TURNOVER_STOCK_OFFSET: f64 = 10.0;

/// `numerator / denominator * scale`, or `0` when the denominator is zero
pub fn safe_divide(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * scale
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage rate, rounded
pub fn rate(numerator: f64, denominator: f64) -> f64 {
    round2(safe_divide(numerator, denominator, PERCENT))
}

/// Percent change from `previous` to `current`; `0` when there is no baseline
pub fn percentage_growth(current: f64, previous: f64) -> f64 {
    rate(current - previous, previous)
}

/// Ordered threshold lookup.
///
/// Returns the label of the first threshold the value is strictly below, or the
/// last label when it is above all of them. `labels` must hold one more entry
/// than `thresholds`.
pub fn bucketize<T: Copy>(value: f64, thresholds: &[f64], labels: &[T]) -> T {
    debug_assert_eq!(labels.len(), thresholds.len() + 1);
    let index = thresholds
        .iter()
        .position(|threshold| value < *threshold)
        .unwrap_or(thresholds.len());
    labels[index.min(labels.len() - 1)]
}

pub fn ltv_bucket(lifetime_spend: f64) -> LtvBucket {
    bucketize(lifetime_spend, &LTV_THRESHOLDS, &LtvBucket::ALL)
}

/// Share of previously known customers lost in the period, in percent.
///
/// `previous = total - new`, `lost = previous - returning`. Zero whenever there
/// are no customers at all or no previous customers.
pub fn churn_rate(total_customers: i64, new_customers: i64, returning_customers: i64) -> f64 {
    if total_customers == 0 {
        return 0.0;
    }
    let previous = total_customers - new_customers;
    if previous <= 0 {
        return 0.0;
    }
    let lost = previous - returning_customers;
    rate(lost as f64, previous as f64)
}

/// `quantity_sold / ((stock + 10) / 2)` for one product
pub fn turnover_ratio(quantity_sold: i64, stock: i32) -> f64 {
    let average_inventory = (stock as f64 + TURNOVER_STOCK_OFFSET) / 2.0;
    safe_divide(quantity_sold as f64, average_inventory, 1.0)
}

/// Arithmetic mean, `0` for an empty input
pub fn average(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    safe_divide(sum, count as f64, 1.0)
}

/// Net income over revenue, in percent
pub fn profit_margin(net_income: f64, revenue: f64) -> f64 {
    rate(net_income, revenue)
}
