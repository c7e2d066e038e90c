use tracing::trace;

use super::engine::{annuity_due_future_value, compound_growth, round_currency, series_years};
use super::types::{
    CompoundingFrequency, FrequencyInputs, FrequencyOutcome, Investor, TimingInputs,
    TimingResult, TimingSummary, TimingYear,
};

pub fn compare_frequencies(inputs: &FrequencyInputs) -> Vec<FrequencyOutcome> {
    let FrequencyInputs {
        principal,
        annual_rate,
        years,
    } = *inputs;

    if principal <= 0.0 || annual_rate <= 0.0 || years <= 0.0 {
        trace!(principal, annual_rate, years, "frequency short-circuit");
        return Vec::new();
    }

    let value_at = |k: u32| {
        let k = k as f64;
        compound_growth(principal, annual_rate / k, k * years)
    };
    let annual = value_at(1);

    CompoundingFrequency::ALL
        .iter()
        .map(|&frequency| {
            let periods_per_year = frequency.periods_per_year();
            let final_value = value_at(periods_per_year);
            FrequencyOutcome {
                frequency,
                periods_per_year,
                final_value: round_currency(final_value),
                total_interest: round_currency(final_value - principal),
                extra_interest_vs_annual: round_currency(final_value - annual),
            }
        })
        .collect()
}

// The balance compounds a payment of twelve times the monthly amount each
// month; contributions count the monthly amount once.
fn investor_position(monthly: f64, monthly_rate: f64, contributing_years: f64) -> (f64, f64) {
    if contributing_years <= 0.0 {
        return (0.0, 0.0);
    }
    let months = contributing_years * 12.0;
    (
        monthly * months,
        annuity_due_future_value(monthly * 12.0, monthly_rate, months),
    )
}

/// After the early investor stops, the balance at the stop year grows at the
/// plain annual rate.
pub fn race_early_vs_late(inputs: &TimingInputs) -> TimingResult {
    let total_years = inputs.terminal_age - inputs.early_start_age;
    let monthly_rate = inputs.annual_rate / 12.0;

    if total_years <= 0.0 || inputs.annual_rate <= 0.0 {
        trace!(total_years, annual_rate = inputs.annual_rate, "timing short-circuit");
        return TimingResult::default();
    }

    let early_period = (inputs.early_stop_age - inputs.early_start_age).max(0.0);
    let late_offset = inputs.late_start_age - inputs.early_start_age;
    let (early_invested_at_stop, early_value_at_stop) =
        investor_position(inputs.early_monthly, monthly_rate, early_period);

    let chart_data: Vec<TimingYear> = (1..=series_years(total_years))
        .map(|year| {
            let year = year as f64;

            let (early_invested, early_value) = if year <= early_period {
                investor_position(inputs.early_monthly, monthly_rate, year)
            } else {
                let growth_years = year - early_period;
                (
                    early_invested_at_stop,
                    compound_growth(early_value_at_stop, inputs.annual_rate, growth_years),
                )
            };

            let (late_invested, late_value) = if year > late_offset {
                investor_position(inputs.late_monthly, monthly_rate, year - late_offset)
            } else {
                (0.0, 0.0)
            };

            TimingYear {
                year: inputs.early_start_age + year,
                early_investor: round_currency(early_value),
                late_investor: round_currency(late_value),
                early_investor_total: round_currency(early_invested),
                late_investor_total: round_currency(late_invested),
            }
        })
        .collect();

    let summary = chart_data.last().map(|last| TimingSummary {
        early_total_invested: last.early_investor_total,
        early_final_value: last.early_investor,
        late_total_invested: last.late_investor_total,
        late_final_value: last.late_investor,
        winner: if last.early_investor > last.late_investor {
            Investor::Early
        } else if last.late_investor > last.early_investor {
            Investor::Late
        } else {
            Investor::Tie
        },
    });

    TimingResult {
        chart_data,
        summary,
    }
}
