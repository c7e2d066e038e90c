use tracing::trace;

use super::engine::{
    compound_growth, ordinary_annuity_future_value, required_payment, round_currency,
    series_years,
};
use super::types::{GoalInputs, GoalResult, GoalYear};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContributionPlan {
    pub lump_sum: f64,
    pub annual_rate: f64,
    pub monthly_rate: f64,
    pub lump_sum_future_value: f64,
    pub shortfall: f64,
    pub monthly_payment: f64,
}

impl ContributionPlan {
    /// Callers guarantee `annual_rate > 0` and `years > 0`.
    pub fn solve(target: f64, lump_sum: f64, annual_rate: f64, years: f64) -> Self {
        let monthly_rate = annual_rate / 12.0;
        let lump_sum_future_value = compound_growth(lump_sum, annual_rate, years);
        let shortfall = (target - lump_sum_future_value).max(0.0);
        let monthly_payment = required_payment(shortfall, monthly_rate, years * 12.0);
        Self {
            lump_sum,
            annual_rate,
            monthly_rate,
            lump_sum_future_value,
            shortfall,
            monthly_payment,
        }
    }

    pub fn progress(&self, year: u32) -> (f64, f64) {
        let months = year as f64 * 12.0;
        let lump = compound_growth(self.lump_sum, self.annual_rate, year as f64);
        let sip = if self.monthly_payment > 0.0 {
            ordinary_annuity_future_value(self.monthly_payment, self.monthly_rate, months)
        } else {
            0.0
        };
        (self.lump_sum + self.monthly_payment * months, lump + sip)
    }
}

pub fn solve_goal(inputs: &GoalInputs) -> GoalResult {
    let GoalInputs {
        target_amount,
        years,
        annual_rate,
        current_savings,
    } = *inputs;

    if target_amount <= 0.0 || years <= 0.0 || annual_rate <= 0.0 {
        trace!(target_amount, years, annual_rate, "goal short-circuit");
        return GoalResult::default();
    }

    let plan = ContributionPlan::solve(target_amount, current_savings, annual_rate, years);

    let chart_data = (1..=series_years(years))
        .map(|year| {
            let (invested, value) = plan.progress(year);
            GoalYear {
                year,
                invested: round_currency(invested),
                value: round_currency(value),
                target: target_amount,
            }
        })
        .collect();

    GoalResult {
        required_monthly_sip: round_currency(plan.monthly_payment),
        future_value_of_current_savings: round_currency(plan.lump_sum_future_value),
        shortfall: round_currency(plan.shortfall),
        chart_data,
    }
}
