use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use tracing::info;

use super::{AppState, Calculator, CliError, FundsPayload, calculate, explore, run_http_server};
use crate::core::{RawInputs, StaticFunds};

#[derive(Parser, Debug)]
#[command(
    name = "wealthcalc",
    about = "SIP, lumpsum, goal, retirement, FD-vs-SIP and compounding calculators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Monthly SIP maturity
    Sip(SipArgs),
    /// One-time investment growth
    Lumpsum(LumpsumArgs),
    /// Monthly SIP needed to reach a target
    Goal(GoalArgs),
    /// Retirement corpus and drawdown
    Retirement(RetirementArgs),
    /// Monthly deposits in an FD versus a SIP
    FdVsSip(FdVsSipArgs),
    /// Compounding frequency or early-vs-late timing race
    Compounding(CompoundingArgs),
    /// Filter and sort the fund catalogue
    Funds(FundsArgs),
}

#[derive(Args, Debug, Default)]
pub struct SipArgs {
    #[arg(long, allow_hyphen_values = true)]
    monthly_investment: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Expected annual return in percent")]
    return_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Duration in years")]
    investment_duration: Option<String>,
    #[arg(long, help = "Report maturity in today's money (6% inflation)")]
    adjust_for_inflation: bool,
}

#[derive(Args, Debug, Default)]
pub struct LumpsumArgs {
    #[arg(long, allow_hyphen_values = true)]
    initial_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Duration in years")]
    time_period: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Expected annual return in percent")]
    return_rate: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct GoalArgs {
    #[arg(long, allow_hyphen_values = true)]
    target_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Duration in years")]
    time_period: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Expected annual return in percent")]
    expected_return: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    current_savings: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RetirementArgs {
    #[arg(long, allow_hyphen_values = true)]
    current_age: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    retirement_age: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Monthly expenses in today's money")]
    monthly_expenses: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Expected annual return in percent")]
    expected_return: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Expected annual inflation in percent")]
    inflation_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    life_expectancy: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    current_savings: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct FdVsSipArgs {
    #[arg(long, allow_hyphen_values = true)]
    monthly_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Duration in years")]
    time_period: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "SIP annual return in percent")]
    sip_return_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "FD annual rate in percent")]
    fd_return_rate: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct CompoundingArgs {
    #[arg(long, help = "timing or frequency")]
    scenario: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    early_investment_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    early_start_age: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    early_stop_age: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    late_investment_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    late_start_age: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Age both investors are measured at")]
    retirement_age: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Timing race annual return in percent")]
    timing_return_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    principal_amount: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Annual rate in percent")]
    annual_rate: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Duration in years")]
    investment_period: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct FundsArgs {
    #[arg(long = "type", help = "All, Equity, Debt or Hybrid")]
    fund_type: Option<String>,
    #[arg(long, help = "All, Low, Moderate, High or Very High")]
    risk: Option<String>,
    #[arg(long, help = "returns, aum or rating")]
    sort_by: Option<String>,
}

fn collect_raw(fields: &[(&str, &Option<String>)]) -> RawInputs {
    fields
        .iter()
        .filter_map(|&(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
}

impl SipArgs {
    fn raw(&self) -> RawInputs {
        let mut raw = collect_raw(&[
            ("monthlyInvestment", &self.monthly_investment),
            ("returnRate", &self.return_rate),
            ("investmentDuration", &self.investment_duration),
        ]);
        if self.adjust_for_inflation {
            raw.insert("adjustForInflation", "true");
        }
        raw
    }
}

impl LumpsumArgs {
    fn raw(&self) -> RawInputs {
        collect_raw(&[
            ("initialAmount", &self.initial_amount),
            ("timePeriod", &self.time_period),
            ("returnRate", &self.return_rate),
        ])
    }
}

impl GoalArgs {
    fn raw(&self) -> RawInputs {
        collect_raw(&[
            ("targetAmount", &self.target_amount),
            ("timePeriod", &self.time_period),
            ("expectedReturn", &self.expected_return),
            ("currentSavings", &self.current_savings),
        ])
    }
}

impl RetirementArgs {
    fn raw(&self) -> RawInputs {
        collect_raw(&[
            ("currentAge", &self.current_age),
            ("retirementAge", &self.retirement_age),
            ("monthlyExpenses", &self.monthly_expenses),
            ("expectedReturn", &self.expected_return),
            ("inflationRate", &self.inflation_rate),
            ("lifeExpectancy", &self.life_expectancy),
            ("currentSavings", &self.current_savings),
        ])
    }
}

impl FdVsSipArgs {
    fn raw(&self) -> RawInputs {
        collect_raw(&[
            ("monthlyAmount", &self.monthly_amount),
            ("timePeriod", &self.time_period),
            ("sipReturnRate", &self.sip_return_rate),
            ("fdReturnRate", &self.fd_return_rate),
        ])
    }
}

impl CompoundingArgs {
    fn raw(&self) -> RawInputs {
        collect_raw(&[
            ("scenario", &self.scenario),
            ("earlyInvestmentAmount", &self.early_investment_amount),
            ("earlyStartAge", &self.early_start_age),
            ("earlyStopAge", &self.early_stop_age),
            ("lateInvestmentAmount", &self.late_investment_amount),
            ("lateStartAge", &self.late_start_age),
            ("retirementAge", &self.retirement_age),
            ("timingReturnRate", &self.timing_return_rate),
            ("principalAmount", &self.principal_amount),
            ("annualRate", &self.annual_rate),
            ("investmentPeriod", &self.investment_period),
        ])
    }
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let (calculator, raw) = match cli.command {
        Command::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            return Ok(run_http_server(addr, AppState::default()).await?);
        }
        Command::Funds(args) => {
            let payload = FundsPayload {
                fund_type: args.fund_type,
                risk: args.risk,
                sort_by: args.sort_by,
            };
            let result = explore(&StaticFunds::sample(), &payload)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }
        Command::Sip(args) => (Calculator::Sip, args.raw()),
        Command::Lumpsum(args) => (Calculator::Lumpsum, args.raw()),
        Command::Goal(args) => (Calculator::Goal, args.raw()),
        Command::Retirement(args) => (Calculator::Retirement, args.raw()),
        Command::FdVsSip(args) => (Calculator::FdVsSip, args.raw()),
        Command::Compounding(args) => (Calculator::Compounding, args.raw()),
    };

    info!(?calculator, "running calculator");
    let response = calculate(calculator, &raw);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sip_args_map_to_form_fields() {
        let cli = Cli::try_parse_from([
            "wealthcalc",
            "sip",
            "--monthly-investment",
            "5000",
            "--return-rate",
            "12",
            "--adjust-for-inflation",
        ])
        .expect("valid args");
        let Command::Sip(args) = cli.command else {
            panic!("expected sip command");
        };
        let raw = args.raw();
        assert_eq!(raw.get("monthlyInvestment"), Some("5000"));
        assert_eq!(raw.get("returnRate"), Some("12"));
        assert_eq!(raw.get("investmentDuration"), None);
        assert_eq!(raw.get("adjustForInflation"), Some("true"));
    }

    #[test]
    fn negative_values_are_passed_through_as_text() {
        let cli = Cli::try_parse_from(["wealthcalc", "lumpsum", "--initial-amount", "-500"])
            .expect("valid args");
        let Command::Lumpsum(args) = cli.command else {
            panic!("expected lumpsum command");
        };
        assert_eq!(args.raw().get("initialAmount"), Some("-500"));
    }

    #[test]
    fn serve_defaults_to_port_8080() {
        let cli = Cli::try_parse_from(["wealthcalc", "serve"]).expect("valid args");
        let Command::Serve { host, port } = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(port, 8080);
        assert!(host.is_unspecified());
    }

    #[test]
    fn compounding_args_cover_both_scenarios() {
        let raw = CompoundingArgs {
            scenario: Some("frequency".into()),
            principal_amount: Some("1000".into()),
            late_start_age: Some("40".into()),
            ..CompoundingArgs::default()
        }
        .raw();
        assert_eq!(raw.get("scenario"), Some("frequency"));
        assert_eq!(raw.get("principalAmount"), Some("1000"));
        assert_eq!(raw.get("lateStartAge"), Some("40"));
    }
}
