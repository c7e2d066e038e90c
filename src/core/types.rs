use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Instrument {
    Sip,
    FixedDeposit,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Investor {
    Early,
    Late,
    Tie,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum CompoundingScenario {
    #[default]
    Timing,
    Frequency,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum CompoundingFrequency {
    #[serde(rename = "Annually")]
    Annually,
    #[serde(rename = "Semi-Annually")]
    SemiAnnually,
    #[serde(rename = "Quarterly")]
    Quarterly,
    #[serde(rename = "Monthly")]
    Monthly,
    #[serde(rename = "Daily")]
    Daily,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 5] = [
        CompoundingFrequency::Annually,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CompoundingFrequency::Annually => "Annually",
            CompoundingFrequency::SemiAnnually => "Semi-Annually",
            CompoundingFrequency::Quarterly => "Quarterly",
            CompoundingFrequency::Monthly => "Monthly",
            CompoundingFrequency::Daily => "Daily",
        }
    }

    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LumpsumInputs {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
}

impl Default for LumpsumInputs {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            annual_rate: 0.12,
            years: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SipInputs {
    pub monthly_investment: f64,
    pub annual_rate: f64,
    pub years: f64,
    pub adjust_for_inflation: bool,
}

impl Default for SipInputs {
    fn default() -> Self {
        Self {
            monthly_investment: 5_000.0,
            annual_rate: 0.12,
            years: 10.0,
            adjust_for_inflation: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GoalInputs {
    pub target_amount: f64,
    pub years: f64,
    pub annual_rate: f64,
    pub current_savings: f64,
}

impl Default for GoalInputs {
    fn default() -> Self {
        Self {
            target_amount: 5_000_000.0,
            years: 15.0,
            annual_rate: 0.12,
            current_savings: 100_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementInputs {
    pub current_age: f64,
    pub retirement_age: f64,
    pub monthly_expenses: f64,
    pub annual_return: f64,
    pub inflation_rate: f64,
    pub life_expectancy: f64,
    pub current_savings: f64,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: 30.0,
            retirement_age: 60.0,
            monthly_expenses: 50_000.0,
            annual_return: 0.12,
            inflation_rate: 0.06,
            life_expectancy: 80.0,
            current_savings: 500_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FdVsSipInputs {
    pub monthly_amount: f64,
    pub years: f64,
    pub sip_rate: f64,
    pub fd_rate: f64,
}

impl Default for FdVsSipInputs {
    fn default() -> Self {
        Self {
            monthly_amount: 10_000.0,
            years: 15.0,
            sip_rate: 0.12,
            fd_rate: 0.065,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyInputs {
    pub principal: f64,
    pub annual_rate: f64,
    pub years: f64,
}

impl Default for FrequencyInputs {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            annual_rate: 0.12,
            years: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimingInputs {
    pub early_monthly: f64,
    pub early_start_age: f64,
    pub early_stop_age: f64,
    pub late_monthly: f64,
    pub late_start_age: f64,
    pub terminal_age: f64,
    pub annual_rate: f64,
}

impl Default for TimingInputs {
    fn default() -> Self {
        Self {
            early_monthly: 2_000.0,
            early_start_age: 25.0,
            early_stop_age: 35.0,
            late_monthly: 4_000.0,
            late_start_age: 35.0,
            terminal_age: 60.0,
            annual_rate: 0.12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumYear {
    pub year: u32,
    pub invested: f64,
    pub earned: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumResult {
    pub final_value: f64,
    pub total_earned: f64,
    pub chart_data: Vec<LumpsumYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipYear {
    pub year: u32,
    pub invested: f64,
    pub maturity: f64,
    pub wealth: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub total_invested: f64,
    pub maturity_value: f64,
    pub wealth_gained: f64,
    pub chart_data: Vec<SipYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalYear {
    pub year: u32,
    pub invested: f64,
    pub value: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResult {
    pub required_monthly_sip: f64,
    pub future_value_of_current_savings: f64,
    pub shortfall: f64,
    pub chart_data: Vec<GoalYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccumulationYear {
    pub age: f64,
    pub invested: f64,
    pub corpus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalYear {
    pub age: f64,
    pub withdrawal_years: u32,
    pub withdrawal: f64,
    pub remaining_corpus: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub future_monthly_expenses: f64,
    pub required_corpus: f64,
    pub required_monthly_sip: f64,
    pub current_savings_future_value: f64,
    pub shortfall: f64,
    pub corpus_depleted: bool,
    pub depletion_age: Option<f64>,
    pub chart_data: Vec<AccumulationYear>,
    pub withdrawal_data: Vec<WithdrawalYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonYear {
    pub year: u32,
    pub fd_value: f64,
    pub sip_value: f64,
    pub fd_invested: f64,
    pub sip_invested: f64,
    pub advantage_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FdVsSipResult {
    pub fd_maturity_value: f64,
    pub sip_maturity_value: f64,
    pub total_invested: f64,
    pub fd_gains: f64,
    pub sip_gains: f64,
    pub advantage: f64,
    pub advantage_percent: f64,
    pub winner: Option<Instrument>,
    pub chart_data: Vec<ComparisonYear>,
}

impl Default for FdVsSipResult {
    fn default() -> Self {
        Self {
            fd_maturity_value: 0.0,
            sip_maturity_value: 0.0,
            total_invested: 0.0,
            fd_gains: 0.0,
            sip_gains: 0.0,
            advantage: 0.0,
            advantage_percent: 0.0,
            winner: None,
            chart_data: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyOutcome {
    pub frequency: CompoundingFrequency,
    pub periods_per_year: u32,
    pub final_value: f64,
    pub total_interest: f64,
    pub extra_interest_vs_annual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingYear {
    pub year: f64,
    pub early_investor: f64,
    pub late_investor: f64,
    pub early_investor_total: f64,
    pub late_investor_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSummary {
    pub early_total_invested: f64,
    pub early_final_value: f64,
    pub late_total_invested: f64,
    pub late_final_value: f64,
    pub winner: Investor,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingResult {
    pub chart_data: Vec<TimingYear>,
    pub summary: Option<TimingSummary>,
}
