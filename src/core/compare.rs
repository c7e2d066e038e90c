use tracing::trace;

use super::engine::{annuity_due_future_value, round_currency, series_years, whole_periods};
use super::types::{ComparisonYear, FdVsSipInputs, FdVsSipResult, Instrument};

/// Deposits are made at months `1..=floor(months)`; deposit `m` is held for
/// `(months - m + 1) / 12` years at the annual rate.
pub fn fixed_deposit_value(monthly: f64, annual_rate: f64, months: f64) -> f64 {
    let deposits = whole_periods(months);
    if deposits == 0 {
        return 0.0;
    }
    let growth = (1.0 + annual_rate).powf(1.0 / 12.0);
    if growth == 1.0 {
        return monthly * deposits as f64;
    }
    let newest = growth.powf(months - deposits as f64 + 1.0);
    monthly * newest * (growth.powf(deposits as f64) - 1.0) / (growth - 1.0)
}

fn fixed_deposit_by_year(monthly: f64, annual_rate: f64, years: u32) -> Vec<f64> {
    let one_year = fixed_deposit_value(monthly, annual_rate, 12.0);
    let mut balance = 0.0;
    (1..=years)
        .map(|_| {
            balance = balance * (1.0 + annual_rate) + one_year;
            balance
        })
        .collect()
}

fn advantage_percent(sip_value: f64, fd_value: f64) -> f64 {
    if fd_value > 0.0 {
        (sip_value - fd_value) / fd_value * 100.0
    } else {
        0.0
    }
}

pub fn compare_fd_vs_sip(inputs: &FdVsSipInputs) -> FdVsSipResult {
    let FdVsSipInputs {
        monthly_amount,
        years,
        sip_rate,
        fd_rate,
    } = *inputs;

    if monthly_amount <= 0.0 || years <= 0.0 || sip_rate <= 0.0 {
        trace!(monthly_amount, years, sip_rate, "fd-vs-sip short-circuit");
        return FdVsSipResult::default();
    }

    let months = years * 12.0;
    let monthly_rate = sip_rate / 12.0;
    let total_invested = monthly_amount * months;

    let sip_maturity = annuity_due_future_value(monthly_amount, monthly_rate, months);
    let fd_maturity = fixed_deposit_value(monthly_amount, fd_rate, months);
    let advantage = sip_maturity - fd_maturity;

    let chart_data = fixed_deposit_by_year(monthly_amount, fd_rate, series_years(years))
        .into_iter()
        .zip(1u32..)
        .map(|(fd_value, year)| {
            let elapsed = year as f64 * 12.0;
            let sip_value = annuity_due_future_value(monthly_amount, monthly_rate, elapsed);
            let invested = round_currency(monthly_amount * elapsed);
            ComparisonYear {
                year,
                fd_value: round_currency(fd_value),
                sip_value: round_currency(sip_value),
                fd_invested: invested,
                sip_invested: invested,
                advantage_percent: advantage_percent(sip_value, fd_value),
            }
        })
        .collect();

    let winner = if sip_maturity > fd_maturity {
        Instrument::Sip
    } else {
        Instrument::FixedDeposit
    };

    FdVsSipResult {
        fd_maturity_value: round_currency(fd_maturity),
        sip_maturity_value: round_currency(sip_maturity),
        total_invested: round_currency(total_invested),
        fd_gains: round_currency(fd_maturity - total_invested),
        sip_gains: round_currency(sip_maturity - total_invested),
        advantage: round_currency(advantage),
        advantage_percent: advantage_percent(sip_maturity, fd_maturity),
        winner: Some(winner),
        chart_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::MAX_SERIES_YEARS;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn oracle_default_comparison_matches_hand_calculation() {
        // SIP: 10000 at 1%/month for 180 months (annuity-due) = 5045759.995
        // FD:  sum of 10000 * 1.065^(k/12), k = 1..180       = 3003047.061
        let result = compare_fd_vs_sip(&FdVsSipInputs::default());
        assert_eq!(result.total_invested, 1_800_000.0);
        assert_eq!(result.sip_maturity_value, 5_045_760.0);
        assert_eq!(result.fd_maturity_value, 3_003_047.0);
        assert_eq!(result.advantage, 2_042_713.0);
        assert_eq!(result.sip_gains, 3_245_760.0);
        assert_eq!(result.fd_gains, 1_203_047.0);
        assert!((result.advantage_percent - 68.0213).abs() < 1e-3);
        assert_eq!(result.winner, Some(Instrument::Sip));
        assert_eq!(result.chart_data.len(), 15);
    }

    #[test]
    fn first_year_row_tracks_both_instruments() {
        let result = compare_fd_vs_sip(&FdVsSipInputs::default());
        let first = &result.chart_data[0];
        assert_eq!(first.year, 1);
        assert_eq!(first.fd_invested, 120_000.0);
        assert_eq!(first.sip_invested, 120_000.0);
        assert_eq!(first.fd_value, 124_184.0);
        assert_eq!(first.sip_value, 128_093.0);
        assert!(first.advantage_percent > 0.0);
    }

    fn summed_deposits(monthly: f64, annual_rate: f64, months: f64) -> f64 {
        (1..=whole_periods(months))
            .map(|m| monthly * (1.0 + annual_rate).powf((months - m as f64 + 1.0) / 12.0))
            .sum()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= expected.abs() * 1e-10 + 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fixed_deposit_at_zero_rate_returns_deposits() {
        assert!((fixed_deposit_value(1_000.0, 0.0, 24.0) - 24_000.0).abs() < 1e-9);
        assert_eq!(fixed_deposit_value(1_000.0, 0.07, 0.0), 0.0);
        assert_eq!(fixed_deposit_value(1_000.0, 0.07, 0.9), 0.0);
    }

    #[test]
    fn fixed_deposit_single_deposit_compounds_one_month() {
        let value = fixed_deposit_value(1_000.0, 0.12, 1.0);
        assert!((value - 1_000.0 * 1.12f64.powf(1.0 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn fixed_deposit_matches_deposit_by_deposit_sum() {
        for months in [1.0, 12.0, 12.6, 37.25, 180.0] {
            assert_close(
                fixed_deposit_value(10_000.0, 0.065, months),
                summed_deposits(10_000.0, 0.065, months),
            );
        }
        // 12 deposits, the newest held 1.6 months
        assert_eq!(
            round_currency(fixed_deposit_value(10_000.0, 0.065, 12.6)),
            124_576.0
        );
    }

    #[test]
    fn yearly_fd_track_matches_direct_valuation() {
        let track = fixed_deposit_by_year(10_000.0, 0.065, 30);
        assert_eq!(track.len(), 30);
        for (year, value) in (1u32..).zip(&track) {
            assert_close(*value, fixed_deposit_value(10_000.0, 0.065, year as f64 * 12.0));
        }
    }

    #[test]
    fn fractional_horizon_values_trailing_part_month() {
        let result = compare_fd_vs_sip(&FdVsSipInputs {
            years: 1.05,
            ..FdVsSipInputs::default()
        });
        assert_eq!(result.fd_maturity_value, 124_576.0);
        assert_eq!(result.total_invested, 126_000.0);
        assert_eq!(result.chart_data.len(), 1);
    }

    #[test]
    fn huge_horizon_keeps_series_bounded() {
        let result = compare_fd_vs_sip(&FdVsSipInputs {
            years: 100_000.0,
            ..FdVsSipInputs::default()
        });
        assert_eq!(result.chart_data.len(), MAX_SERIES_YEARS as usize);
    }

    #[test]
    fn fd_wins_when_its_rate_dominates() {
        let result = compare_fd_vs_sip(&FdVsSipInputs {
            monthly_amount: 1_000.0,
            years: 5.0,
            sip_rate: 0.02,
            fd_rate: 0.09,
        });
        assert_eq!(result.winner, Some(Instrument::FixedDeposit));
        assert!(result.advantage < 0.0);
        assert!(result.advantage_percent < 0.0);
    }

    #[test]
    fn degenerate_inputs_return_zero_record() {
        let base = FdVsSipInputs::default();
        for inputs in [
            FdVsSipInputs { monthly_amount: 0.0, ..base.clone() },
            FdVsSipInputs { years: 0.0, ..base.clone() },
            FdVsSipInputs { sip_rate: 0.0, ..base.clone() },
        ] {
            let result = compare_fd_vs_sip(&inputs);
            assert_eq!(result, FdVsSipResult::default());
            assert_eq!(result.winner, None);
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_series_invested_is_exact_and_values_grow(
            monthly in 100u32..100_000,
            years in 1u32..25,
            sip_bp in 1u32..2_000,
            fd_bp in 0u32..1_200
        ) {
            let result = compare_fd_vs_sip(&FdVsSipInputs {
                monthly_amount: monthly as f64,
                years: years as f64,
                sip_rate: sip_bp as f64 / 10_000.0,
                fd_rate: fd_bp as f64 / 10_000.0,
            });
            prop_assert_eq!(result.chart_data.len(), years as usize);
            let mut prev = (0.0, 0.0);
            for row in &result.chart_data {
                prop_assert_eq!(row.fd_invested, (monthly as u64 * row.year as u64 * 12) as f64);
                prop_assert!(row.fd_value >= row.fd_invested - 1.0);
                prop_assert!(row.sip_value >= prev.0 && row.fd_value >= prev.1);
                prev = (row.sip_value, row.fd_value);
            }
            let last = result.chart_data.last().expect("series");
            prop_assert!((last.fd_value - result.fd_maturity_value).abs() <= 1.0);
            prop_assert_eq!(
                result.winner,
                Some(if result.sip_maturity_value > result.fd_maturity_value {
                    Instrument::Sip
                } else if result.sip_maturity_value < result.fd_maturity_value {
                    Instrument::FixedDeposit
                } else {
                    result.winner.expect("winner")
                })
            );
        }
    }
}
