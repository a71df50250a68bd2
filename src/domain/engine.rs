//! Allocation engine: current-allocation aggregation, rebalancing detection
//! and recommendation, salary-based investment amounts.

use chrono::{DateTime, Utc};

use super::allocation::{AssetAllocation, CategoryAmounts};
use super::category::FundCategory;
use super::fund::Fund;
use super::portfolio::Portfolio;
use super::presets::PresetTable;

/// Rebalancing is due after this long regardless of drift.
pub const REBALANCE_INTERVAL_YEARS: f64 = 2.5;

/// Rebalancing is due once any category drifts this many points from target.
pub const REBALANCE_DRIFT_POINTS: i64 = 10;

/// 365-day year approximation used for the elapsed-time check.
const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Allocation implied by current fund market values.
///
/// Each category percentage is rounded to the nearest integer independently
/// (half away from zero), so the result can total a point or two off 100.
/// Rebalancing amounts are defined in terms of these rounded figures, so the
/// drift is part of the contract, not an artifact to correct.
///
/// A portfolio with no value at all (no funds, or every fund at zero) gets
/// the first preset's allocation rather than an all-zero one.
pub fn current_allocation(funds: &[Fund], table: &PresetTable) -> AssetAllocation {
    let total: f64 = funds.iter().map(|f| f.current_value).sum();
    if total == 0.0 {
        return table.first().allocation;
    }

    let mut sums = CategoryAmounts::default();
    for fund in funds {
        sums.add(fund.category, fund.current_value);
    }

    let mut allocation = AssetAllocation::ZERO;
    for (category, sum) in sums.iter() {
        allocation.set(category, (sum / total * 100.0).round() as u32);
    }
    allocation
}

/// Whether the portfolio is due for rebalancing at `now`: either
/// [`REBALANCE_INTERVAL_YEARS`] have elapsed since `last_rebalanced`, or some
/// category's current allocation is at least [`REBALANCE_DRIFT_POINTS`] away
/// from target. Both boundaries are inclusive. Returns only the verdict; the
/// caller recomputes recommendations separately.
pub fn rebalancing_needed(portfolio: &Portfolio, table: &PresetTable, now: DateTime<Utc>) -> bool {
    let elapsed = now.signed_duration_since(portfolio.last_rebalanced);
    let years = elapsed.num_seconds() as f64 / SECONDS_PER_YEAR;
    if years >= REBALANCE_INTERVAL_YEARS {
        return true;
    }

    let current = current_allocation(&portfolio.funds, table);
    FundCategory::ALL.iter().any(|&category| {
        let gap =
            (current.get(category) as i64 - portfolio.allocation.get(category) as i64).abs();
        gap >= REBALANCE_DRIFT_POINTS
    })
}

/// Per-category currency deltas that would bring the portfolio back to
/// target: positive means buy more, negative means reduce.
///
/// Built from the rounded current-allocation percentages, so the deltas
/// inherit that rounding error and will not sum to exactly zero.
pub fn rebalancing_recommendations(portfolio: &Portfolio, table: &PresetTable) -> CategoryAmounts {
    let total = portfolio.total_value();
    let current = current_allocation(&portfolio.funds, table);

    let mut recommendations = CategoryAmounts::default();
    for (category, target_pct) in portfolio.allocation.iter() {
        let target_amount = target_pct as f64 / 100.0 * total;
        let current_amount = current.get(category) as f64 / 100.0 * total;
        recommendations.set(category, target_amount - current_amount);
    }
    recommendations
}

/// Monthly investment amount per category for a given salary: the investable
/// amount is `salary * percentage / 100`, split by the target allocation.
/// Fractional currency amounts are left to display formatting.
pub fn investment_by_salary(
    salary: f64,
    allocation: &AssetAllocation,
    percentage: f64,
) -> CategoryAmounts {
    let investable = salary * (percentage / 100.0);

    let mut amounts = CategoryAmounts::default();
    for (category, pct) in allocation.iter() {
        amounts.set(category, investable * (pct as f64 / 100.0));
    }
    amounts
}
