use std::collections::BTreeMap;

use super::types::{
    CompoundingScenario, FdVsSipInputs, FrequencyInputs, GoalInputs, LumpsumInputs,
    RetirementInputs, SipInputs, TimingInputs,
};

/// Longest numeric prefix after leading whitespace: `"12abc"` is 12; `"abc"`,
/// `""` and non-finite values yield `fallback`.
pub fn parse_number_or_default(text: &str, fallback: f64) -> f64 {
    match numeric_prefix(text.trim_start()) {
        Some(prefix) => match prefix.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => fallback,
        },
        None => fallback,
    }
}

fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&text[..end])
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawInputs {
    fields: BTreeMap<String, String>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, text: impl Into<String>) {
        self.fields.insert(field.into(), text.into());
    }

    pub fn with(mut self, field: &str, text: &str) -> Self {
        self.insert(field, text);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Nulls and nested values are dropped.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut raw = Self::new();
        for (key, value) in object {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            raw.insert(key.clone(), text);
        }
        raw
    }

    /// Absent fields keep `current`; present fields parse with `fallback`.
    pub fn number(&self, field: &str, current: f64, fallback: f64) -> f64 {
        match self.get(field) {
            Some(text) => parse_number_or_default(text, fallback),
            None => current,
        }
    }

    pub fn percent(&self, field: &str, current: f64, fallback: f64) -> f64 {
        match self.get(field) {
            Some(text) => parse_number_or_default(text, fallback) / 100.0,
            None => current,
        }
    }

    pub fn flag(&self, field: &str, current: bool) -> bool {
        match self.get(field) {
            Some(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "on" | "yes"
            ),
            None => current,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawInputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut raw = Self::new();
        for (k, v) in iter {
            raw.insert(k, v);
        }
        raw
    }
}

pub trait FromRawInputs: Sized + Default {
    fn apply_raw(self, raw: &RawInputs) -> Self;

    fn from_raw(raw: &RawInputs) -> Self {
        Self::default().apply_raw(raw)
    }
}

impl FromRawInputs for LumpsumInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            principal: raw.number("initialAmount", self.principal, 0.0),
            annual_rate: raw.percent("returnRate", self.annual_rate, 0.0),
            years: raw.number("timePeriod", self.years, 0.0),
        }
    }
}

impl FromRawInputs for SipInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            monthly_investment: raw.number("monthlyInvestment", self.monthly_investment, 0.0),
            annual_rate: raw.percent("returnRate", self.annual_rate, 0.0),
            years: raw.number("investmentDuration", self.years, 0.0),
            adjust_for_inflation: raw.flag("adjustForInflation", self.adjust_for_inflation),
        }
    }
}

impl FromRawInputs for GoalInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            target_amount: raw.number("targetAmount", self.target_amount, 0.0),
            years: raw.number("timePeriod", self.years, 0.0),
            annual_rate: raw.percent("expectedReturn", self.annual_rate, 0.0),
            current_savings: raw.number("currentSavings", self.current_savings, 0.0),
        }
    }
}

impl FromRawInputs for RetirementInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            current_age: raw.number("currentAge", self.current_age, 30.0),
            retirement_age: raw.number("retirementAge", self.retirement_age, 60.0),
            monthly_expenses: raw.number("monthlyExpenses", self.monthly_expenses, 50_000.0),
            annual_return: raw.percent("expectedReturn", self.annual_return, 0.0),
            inflation_rate: raw.percent("inflationRate", self.inflation_rate, 0.0),
            life_expectancy: raw.number("lifeExpectancy", self.life_expectancy, 80.0),
            current_savings: raw.number("currentSavings", self.current_savings, 0.0),
        }
    }
}

impl FromRawInputs for FdVsSipInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            monthly_amount: raw.number("monthlyAmount", self.monthly_amount, 0.0),
            years: raw.number("timePeriod", self.years, 0.0),
            sip_rate: raw.percent("sipReturnRate", self.sip_rate, 0.0),
            fd_rate: raw.percent("fdReturnRate", self.fd_rate, 0.0),
        }
    }
}

impl FromRawInputs for FrequencyInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            principal: raw.number("principalAmount", self.principal, 0.0),
            annual_rate: raw.percent("annualRate", self.annual_rate, 0.0),
            years: raw.number("investmentPeriod", self.years, 0.0),
        }
    }
}

impl FromRawInputs for TimingInputs {
    fn apply_raw(self, raw: &RawInputs) -> Self {
        Self {
            early_monthly: raw.number("earlyInvestmentAmount", self.early_monthly, 0.0),
            early_start_age: raw.number("earlyStartAge", self.early_start_age, 25.0),
            early_stop_age: raw.number("earlyStopAge", self.early_stop_age, 35.0),
            late_monthly: raw.number("lateInvestmentAmount", self.late_monthly, 0.0),
            late_start_age: raw.number("lateStartAge", self.late_start_age, 35.0),
            terminal_age: raw.number("retirementAge", self.terminal_age, 60.0),
            annual_rate: raw.percent("timingReturnRate", self.annual_rate, 0.0),
        }
    }
}

impl CompoundingScenario {
    /// Unknown or missing scenario names select the timing race.
    pub fn from_raw(raw: &RawInputs) -> Self {
        match raw.get("scenario").map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "frequency" => CompoundingScenario::Frequency,
            _ => CompoundingScenario::Timing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop_assert, proptest};

    #[test]
    fn parse_number_reads_numeric_prefix() {
        assert_eq!(parse_number_or_default("12", 0.0), 12.0);
        assert_eq!(parse_number_or_default("  6.5", 0.0), 6.5);
        assert_eq!(parse_number_or_default("12abc", 0.0), 12.0);
        assert_eq!(parse_number_or_default("-3.25%", 0.0), -3.25);
        assert_eq!(parse_number_or_default(".5", 0.0), 0.5);
        assert_eq!(parse_number_or_default("5.", 0.0), 5.0);
        assert_eq!(parse_number_or_default("1e3", 0.0), 1000.0);
        assert_eq!(parse_number_or_default("1e", 0.0), 1.0);
        assert_eq!(parse_number_or_default("2E-2x", 0.0), 0.02);
    }

    #[test]
    fn parse_number_falls_back_on_garbage() {
        assert_eq!(parse_number_or_default("", 0.0), 0.0);
        assert_eq!(parse_number_or_default("   ", 35.0), 35.0);
        assert_eq!(parse_number_or_default("abc", 60.0), 60.0);
        assert_eq!(parse_number_or_default("-", 7.0), 7.0);
        assert_eq!(parse_number_or_default(".", 7.0), 7.0);
        assert_eq!(parse_number_or_default("1e999", 9.0), 9.0);
    }

    #[test]
    fn parse_number_keeps_explicit_zero() {
        assert_eq!(parse_number_or_default("0", 30.0), 0.0);
    }

    #[test]
    fn absent_fields_keep_page_defaults() {
        let inputs = SipInputs::from_raw(&RawInputs::new());
        assert_eq!(inputs, SipInputs::default());
    }

    #[test]
    fn present_fields_override_and_rates_are_percentages() {
        let raw = RawInputs::new()
            .with("monthlyInvestment", "7500")
            .with("returnRate", "9")
            .with("investmentDuration", "")
            .with("adjustForInflation", "on");
        let inputs = SipInputs::from_raw(&raw);
        assert_eq!(inputs.monthly_investment, 7_500.0);
        assert!((inputs.annual_rate - 0.09).abs() < 1e-12);
        assert_eq!(inputs.years, 0.0);
        assert!(inputs.adjust_for_inflation);
    }

    #[test]
    fn retirement_fields_use_hinted_fallbacks() {
        let raw = RawInputs::new()
            .with("currentAge", "x")
            .with("retirementAge", "")
            .with("monthlyExpenses", "?")
            .with("lifeExpectancy", "n/a")
            .with("currentSavings", "none")
            .with("expectedReturn", "");
        let inputs = RetirementInputs::from_raw(&raw);
        assert_eq!(inputs.current_age, 30.0);
        assert_eq!(inputs.retirement_age, 60.0);
        assert_eq!(inputs.monthly_expenses, 50_000.0);
        assert_eq!(inputs.life_expectancy, 80.0);
        assert_eq!(inputs.current_savings, 0.0);
        assert_eq!(inputs.annual_return, 0.0);
    }

    #[test]
    fn timing_fields_use_hinted_fallbacks() {
        let raw = RawInputs::new()
            .with("earlyStopAge", "")
            .with("lateStartAge", "abc")
            .with("retirementAge", "")
            .with("earlyInvestmentAmount", "");
        let inputs = TimingInputs::from_raw(&raw);
        assert_eq!(inputs.early_stop_age, 35.0);
        assert_eq!(inputs.late_start_age, 35.0);
        assert_eq!(inputs.terminal_age, 60.0);
        assert_eq!(inputs.early_monthly, 0.0);
    }

    #[test]
    fn json_objects_stringify_scalars() {
        let value = serde_json::json!({
            "monthlyInvestment": 5000,
            "returnRate": "12",
            "adjustForInflation": true,
            "ignored": null,
            "nested": {"a": 1}
        });
        let raw = RawInputs::from_json_object(value.as_object().expect("object"));
        assert_eq!(raw.get("monthlyInvestment"), Some("5000"));
        assert_eq!(raw.get("returnRate"), Some("12"));
        assert_eq!(raw.get("adjustForInflation"), Some("true"));
        assert_eq!(raw.get("ignored"), None);
        assert_eq!(raw.get("nested"), None);
    }

    #[test]
    fn scenario_defaults_to_timing() {
        assert_eq!(
            CompoundingScenario::from_raw(&RawInputs::new()),
            CompoundingScenario::Timing
        );
        assert_eq!(
            CompoundingScenario::from_raw(&RawInputs::new().with("scenario", "Frequency")),
            CompoundingScenario::Frequency
        );
        assert_eq!(
            CompoundingScenario::from_raw(&RawInputs::new().with("scenario", "bogus")),
            CompoundingScenario::Timing
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_parse_number_is_always_finite(text in any::<String>(), fallback in -1.0e6f64..1.0e6) {
            let v = parse_number_or_default(&text, fallback);
            prop_assert!(v.is_finite());
        }

        #[test]
        fn prop_parse_number_reads_formatted_values(value in -1.0e9f64..1.0e9) {
            let text = format!("{value}");
            prop_assert!((parse_number_or_default(&text, 0.0) - value).abs() <= 1e-9 * value.abs().max(1.0));
        }
    }
}
