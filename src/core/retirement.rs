use tracing::{debug, trace};

use super::engine::{round_currency, series_years};
use super::solver::ContributionPlan;
use super::types::{AccumulationYear, RetirementInputs, RetirementResult, WithdrawalYear};

pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;

pub fn run_retirement_plan(inputs: &RetirementInputs) -> RetirementResult {
    let years_to_retirement = inputs.retirement_age - inputs.current_age;
    let retirement_years = inputs.life_expectancy - inputs.retirement_age;

    if years_to_retirement <= 0.0 || retirement_years <= 0.0 || inputs.annual_return <= 0.0 {
        trace!(
            years_to_retirement,
            retirement_years,
            annual_return = inputs.annual_return,
            "retirement short-circuit"
        );
        return RetirementResult::default();
    }

    let future_monthly_expenses =
        inputs.monthly_expenses * (1.0 + inputs.inflation_rate).powf(years_to_retirement);
    let required_corpus = future_monthly_expenses * 12.0 / SAFE_WITHDRAWAL_RATE;

    let plan = ContributionPlan::solve(
        required_corpus,
        inputs.current_savings,
        inputs.annual_return,
        years_to_retirement,
    );

    let chart_data = (1..=series_years(years_to_retirement))
        .map(|year| {
            let (invested, corpus) = plan.progress(year);
            AccumulationYear {
                age: inputs.current_age + year as f64,
                invested: round_currency(invested),
                corpus: round_currency(corpus),
            }
        })
        .collect();

    let drawdown = simulate_drawdown(
        required_corpus,
        future_monthly_expenses * 12.0,
        inputs.annual_return,
        inputs.inflation_rate,
        series_years(retirement_years),
    );

    let withdrawal_data: Vec<WithdrawalYear> = drawdown
        .iter()
        .map(|step| WithdrawalYear {
            age: inputs.retirement_age + step.year as f64,
            withdrawal_years: step.year,
            withdrawal: round_currency(step.withdrawal),
            remaining_corpus: round_currency(step.remaining).max(0.0),
        })
        .collect();

    let depletion_age = drawdown
        .last()
        .filter(|step| step.remaining <= 0.0)
        .map(|step| inputs.retirement_age + step.year as f64);
    if let Some(age) = depletion_age {
        debug!(age, life_expectancy = inputs.life_expectancy, "corpus depleted early");
    }

    RetirementResult {
        future_monthly_expenses: round_currency(future_monthly_expenses),
        required_corpus: round_currency(required_corpus),
        required_monthly_sip: round_currency(plan.monthly_payment),
        current_savings_future_value: round_currency(plan.lump_sum_future_value),
        shortfall: round_currency(plan.shortfall),
        corpus_depleted: depletion_age.is_some(),
        depletion_age,
        chart_data,
        withdrawal_data,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawdownStep {
    year: u32,
    withdrawal: f64,
    remaining: f64,
}

// Stops after the first year that leaves nothing behind.
fn simulate_drawdown(
    corpus: f64,
    annual_withdrawal: f64,
    annual_return: f64,
    inflation: f64,
    years: u32,
) -> Vec<DrawdownStep> {
    let mut steps = Vec::with_capacity(years as usize);
    let mut remaining = corpus;
    for year in 1..=years {
        remaining *= 1.0 + annual_return;
        let withdrawal = annual_withdrawal * (1.0 + inflation).powi(year as i32);
        remaining -= withdrawal;
        steps.push(DrawdownStep {
            year,
            withdrawal,
            remaining,
        });
        if remaining <= 0.0 {
            break;
        }
    }
    steps
}
