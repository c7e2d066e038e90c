use tracing::trace;

use super::types::{LumpsumInputs, LumpsumResult, LumpsumYear, SipInputs, SipResult, SipYear};

pub const SIP_INFLATION_ASSUMPTION: f64 = 0.06;

/// Halves round towards +infinity.
pub fn round_currency(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub const MAX_SERIES_YEARS: u32 = 1_000;

pub(crate) fn whole_periods(horizon: f64) -> u32 {
    if horizon.is_finite() && horizon >= 1.0 {
        horizon.floor() as u32
    } else {
        0
    }
}

pub(crate) fn series_years(horizon: f64) -> u32 {
    whole_periods(horizon).min(MAX_SERIES_YEARS)
}

pub fn compound_growth(principal: f64, rate: f64, periods: f64) -> f64 {
    principal * (1.0 + rate).powf(periods)
}

/// Future value of `periods` payments made at the start of each period.
///
/// Undefined at `rate == 0`; callers guard a positive rate first.
pub fn annuity_due_future_value(payment: f64, rate: f64, periods: f64) -> f64 {
    payment * (((1.0 + rate).powf(periods) - 1.0) * (1.0 + rate)) / rate
}

pub fn ordinary_annuity_future_value(payment: f64, rate: f64, periods: f64) -> f64 {
    payment * ((1.0 + rate).powf(periods) - 1.0) / rate
}

pub fn required_payment(target: f64, rate: f64, periods: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (target * rate) / ((1.0 + rate).powf(periods) - 1.0)
}

pub fn run_lumpsum(inputs: &LumpsumInputs) -> LumpsumResult {
    let LumpsumInputs {
        principal,
        annual_rate,
        years,
    } = *inputs;

    if principal <= 0.0 || annual_rate <= 0.0 || years <= 0.0 {
        trace!(principal, annual_rate, years, "lumpsum short-circuit");
        return LumpsumResult::default();
    }

    let final_value = compound_growth(principal, annual_rate, years);
    let total_earned = final_value - principal;

    let chart_data = (1..=series_years(years))
        .map(|year| {
            let value = compound_growth(principal, annual_rate, year as f64);
            LumpsumYear {
                year,
                invested: round_currency(principal),
                earned: round_currency(value - principal),
                total: round_currency(value),
            }
        })
        .collect();

    LumpsumResult {
        final_value: round_currency(final_value),
        total_earned: round_currency(total_earned),
        chart_data,
    }
}

pub fn run_sip(inputs: &SipInputs) -> SipResult {
    let monthly = inputs.monthly_investment;
    let rate = inputs.annual_rate / 12.0;
    let months = inputs.years * 12.0;

    if monthly <= 0.0 || rate <= 0.0 || months <= 0.0 {
        trace!(monthly, rate, months, "sip short-circuit");
        return SipResult::default();
    }

    let maturity_value = annuity_due_future_value(monthly, rate, months);
    let total_invested = monthly * months;
    let wealth_gained = maturity_value - total_invested;

    let whole_years = whole_periods(inputs.years);
    let deflate = |value: f64, years: u32| {
        if inputs.adjust_for_inflation {
            value / (1.0 + SIP_INFLATION_ASSUMPTION).powf(years as f64)
        } else {
            value
        }
    };

    let chart_data = (1..=series_years(inputs.years))
        .map(|year| {
            let elapsed = year as f64 * 12.0;
            let maturity = annuity_due_future_value(monthly, rate, elapsed);
            let invested = monthly * elapsed;
            SipYear {
                year,
                invested: round_currency(invested),
                maturity: round_currency(deflate(maturity, year)),
                wealth: round_currency(maturity - invested),
            }
        })
        .collect();

    SipResult {
        total_invested: round_currency(total_invested),
        maturity_value: round_currency(deflate(maturity_value, whole_years)),
        wealth_gained: round_currency(wealth_gained),
        chart_data,
    }
}
