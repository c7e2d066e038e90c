mod compare;
mod compounding;
mod engine;
mod format;
mod funds;
mod parse;
mod retirement;
mod solver;
mod types;

pub use compare::{compare_fd_vs_sip, fixed_deposit_value};
pub use compounding::{compare_frequencies, race_early_vs_late};
pub use engine::{
    MAX_SERIES_YEARS, SIP_INFLATION_ASSUMPTION, annuity_due_future_value, compound_growth,
    ordinary_annuity_future_value, required_payment, round_currency, run_lumpsum, run_sip,
};
pub use format::{format_abbreviated, format_inr, format_tenths};
pub use funds::{
    Fund, FundExplorerResult, FundProvider, FundQuery, FundSort, FundType, PerformanceRow,
    RiskLevel, StaticFunds, TrailingReturns, TypeCount, explore_funds,
};
pub use parse::{FromRawInputs, RawInputs, parse_number_or_default};
pub use retirement::{SAFE_WITHDRAWAL_RATE, run_retirement_plan};
pub use solver::solve_goal;
pub use types::{
    AccumulationYear, ComparisonYear, CompoundingFrequency, CompoundingScenario, FdVsSipInputs,
    FdVsSipResult, FrequencyInputs, FrequencyOutcome, GoalInputs, GoalResult, GoalYear,
    Instrument, Investor, LumpsumInputs, LumpsumResult, LumpsumYear, RetirementInputs,
    RetirementResult, SipInputs, SipResult, SipYear, TimingInputs, TimingResult, TimingSummary,
    TimingYear, WithdrawalYear,
};
