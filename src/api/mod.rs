use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{
    CompoundingScenario, FdVsSipInputs, FdVsSipResult, FrequencyInputs, FrequencyOutcome,
    FromRawInputs, FundExplorerResult, FundProvider, FundQuery, FundSort, FundType, GoalInputs,
    GoalResult, LumpsumInputs, LumpsumResult, RawInputs, RetirementInputs, RetirementResult,
    RiskLevel, SipInputs, SipResult, StaticFunds, TimingInputs, TimingResult, compare_fd_vs_sip,
    compare_frequencies, explore_funds, format_abbreviated, format_inr, format_tenths,
    race_early_vs_late, run_lumpsum, run_retirement_plan, run_sip, solve_goal,
};

pub mod cli;
mod error;

pub use error::{ApiError, CliError};

const DEPLETION_ADVISORY: &str =
    "Corpus may be depleted before life expectancy. Consider increasing your monthly SIP.";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Calculator {
    Sip,
    Lumpsum,
    Goal,
    Retirement,
    FdVsSip,
    Compounding,
}

impl FromStr for Calculator {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sip" => Ok(Calculator::Sip),
            "lumpsum" => Ok(Calculator::Lumpsum),
            "goal" | "goal-planner" => Ok(Calculator::Goal),
            "retirement" => Ok(Calculator::Retirement),
            "fd-vs-sip" => Ok(Calculator::FdVsSip),
            "compounding" => Ok(Calculator::Compounding),
            other => Err(ApiError::NotFound(format!("calculator '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "scenario", rename_all = "lowercase")]
pub enum CompoundingOutput {
    Timing(TimingResult),
    Frequency { outcomes: Vec<FrequencyOutcome> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalculatorOutput {
    Sip(SipResult),
    Lumpsum(LumpsumResult),
    Goal(GoalResult),
    Retirement(RetirementResult),
    FdVsSip(FdVsSipResult),
    Compounding(CompoundingOutput),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResponse {
    pub calculator: Calculator,
    pub result: CalculatorOutput,
    pub display: BTreeMap<String, String>,
    pub advisory: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FundsPayload {
    #[serde(rename = "type")]
    pub fund_type: Option<String>,
    pub risk: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Clone)]
pub struct AppState {
    funds: Arc<dyn FundProvider + Send + Sync>,
}

impl AppState {
    pub fn new(funds: Arc<dyn FundProvider + Send + Sync>) -> Self {
        Self { funds }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(StaticFunds::sample()))
    }
}

pub fn calculate(calculator: Calculator, raw: &RawInputs) -> CalculatorResponse {
    let mut display: BTreeMap<String, String> = BTreeMap::new();
    let mut advisory = None;

    let result = match calculator {
        Calculator::Sip => {
            let inputs = SipInputs::from_raw(raw);
            debug!(?inputs, "sip");
            let result = run_sip(&inputs);
            display.insert("totalInvested".into(), format_abbreviated(result.total_invested));
            display.insert("maturityValue".into(), format_abbreviated(result.maturity_value));
            display.insert("wealthGained".into(), format_abbreviated(result.wealth_gained));
            CalculatorOutput::Sip(result)
        }
        Calculator::Lumpsum => {
            let inputs = LumpsumInputs::from_raw(raw);
            debug!(?inputs, "lumpsum");
            let result = run_lumpsum(&inputs);
            display.insert("invested".into(), format_inr(inputs.principal.max(0.0)));
            display.insert("finalValue".into(), format_abbreviated(result.final_value));
            display.insert("totalEarned".into(), format_abbreviated(result.total_earned));
            CalculatorOutput::Lumpsum(result)
        }
        Calculator::Goal => {
            let inputs = GoalInputs::from_raw(raw);
            debug!(?inputs, "goal");
            let result = solve_goal(&inputs);
            display.insert("requiredMonthlySip".into(), format_inr(result.required_monthly_sip));
            display.insert(
                "futureValueOfCurrentSavings".into(),
                format_abbreviated(result.future_value_of_current_savings),
            );
            display.insert("shortfall".into(), format_abbreviated(result.shortfall));
            CalculatorOutput::Goal(result)
        }
        Calculator::Retirement => {
            let inputs = RetirementInputs::from_raw(raw);
            debug!(?inputs, "retirement");
            let result = run_retirement_plan(&inputs);
            display.insert(
                "futureMonthlyExpenses".into(),
                format_inr(result.future_monthly_expenses),
            );
            display.insert("requiredCorpus".into(), format_abbreviated(result.required_corpus));
            display.insert("requiredMonthlySip".into(), format_inr(result.required_monthly_sip));
            display.insert(
                "currentSavingsFutureValue".into(),
                format_abbreviated(result.current_savings_future_value),
            );
            if result.corpus_depleted {
                advisory = Some(DEPLETION_ADVISORY.to_string());
            }
            CalculatorOutput::Retirement(result)
        }
        Calculator::FdVsSip => {
            let inputs = FdVsSipInputs::from_raw(raw);
            debug!(?inputs, "fd-vs-sip");
            let result = compare_fd_vs_sip(&inputs);
            display.insert("totalInvested".into(), format_abbreviated(result.total_invested));
            display.insert("fdMaturityValue".into(), format_abbreviated(result.fd_maturity_value));
            display.insert(
                "sipMaturityValue".into(),
                format_abbreviated(result.sip_maturity_value),
            );
            display.insert("advantage".into(), format_abbreviated(result.advantage));
            let sign = if result.advantage_percent > 0.0 { "+" } else { "" };
            display.insert(
                "advantagePercent".into(),
                format!(
                    "{sign}{}% more than FD",
                    format_tenths(result.advantage_percent)
                ),
            );
            CalculatorOutput::FdVsSip(result)
        }
        Calculator::Compounding => match CompoundingScenario::from_raw(raw) {
            CompoundingScenario::Timing => {
                let inputs = TimingInputs::from_raw(raw);
                debug!(?inputs, "compounding timing");
                let result = race_early_vs_late(&inputs);
                if let Some(summary) = &result.summary {
                    display.insert(
                        "earlyFinalValue".into(),
                        format_abbreviated(summary.early_final_value),
                    );
                    display.insert(
                        "lateFinalValue".into(),
                        format_abbreviated(summary.late_final_value),
                    );
                    display.insert(
                        "investmentGap".into(),
                        format_inr(summary.late_total_invested - summary.early_total_invested),
                    );
                }
                CalculatorOutput::Compounding(CompoundingOutput::Timing(result))
            }
            CompoundingScenario::Frequency => {
                let inputs = FrequencyInputs::from_raw(raw);
                debug!(?inputs, "compounding frequency");
                let outcomes = compare_frequencies(&inputs);
                for outcome in &outcomes {
                    display.insert(
                        outcome.frequency.label().to_string(),
                        format_abbreviated(outcome.final_value),
                    );
                }
                CalculatorOutput::Compounding(CompoundingOutput::Frequency { outcomes })
            }
        },
    };

    CalculatorResponse {
        calculator,
        result,
        display,
        advisory,
    }
}

pub fn fund_query_from_payload(payload: &FundsPayload) -> Result<FundQuery, ApiError> {
    let fund_type = match payload.fund_type.as_deref().map(str::trim) {
        None | Some("") | Some("All") => None,
        Some("Equity") => Some(FundType::Equity),
        Some("Debt") => Some(FundType::Debt),
        Some("Hybrid") => Some(FundType::Hybrid),
        Some(other) => {
            return Err(ApiError::BadRequest(format!("unknown fund type '{other}'")));
        }
    };

    let risk_level = match payload.risk.as_deref().map(str::trim) {
        None | Some("") | Some("All") => None,
        Some("Low") => Some(RiskLevel::Low),
        Some("Moderate") => Some(RiskLevel::Moderate),
        Some("High") => Some(RiskLevel::High),
        Some("Very High") | Some("VeryHigh") | Some("very-high") => Some(RiskLevel::VeryHigh),
        Some(other) => {
            return Err(ApiError::BadRequest(format!("unknown risk level '{other}'")));
        }
    };

    let sort_by = match payload.sort_by.as_deref().map(str::trim) {
        None | Some("") | Some("returns") => FundSort::Returns,
        Some("aum") => FundSort::Aum,
        Some("rating") => FundSort::Rating,
        Some(other) => {
            return Err(ApiError::BadRequest(format!("unknown sort key '{other}'")));
        }
    };

    Ok(FundQuery {
        fund_type,
        risk_level,
        sort_by,
    })
}

pub fn explore(
    provider: &dyn FundProvider,
    payload: &FundsPayload,
) -> Result<FundExplorerResult, ApiError> {
    let query = fund_query_from_payload(payload)?;
    debug!(?query, "funds");
    Ok(explore_funds(provider, &query))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/funds", get(funds_handler))
        .route(
            "/api/:calculator",
            get(calculator_get_handler).post(calculator_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn run_http_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "wealthcalc HTTP API listening");
    info!("Local access: http://127.0.0.1:{}/health", addr.port());

    axum::serve(listener, app).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    ApiError::NotFound("route".to_string()).into_response()
}

async fn calculator_get_handler(
    Path(name): Path<String>,
    Query(fields): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let calculator = name.parse::<Calculator>()?;
    let raw: RawInputs = fields.into_iter().collect();
    Ok(json_response(StatusCode::OK, calculate(calculator, &raw)))
}

async fn calculator_post_handler(
    Path(name): Path<String>,
    Json(body): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<Response, ApiError> {
    let calculator = name.parse::<Calculator>()?;
    let raw = RawInputs::from_json_object(&body);
    Ok(json_response(StatusCode::OK, calculate(calculator, &raw)))
}

async fn funds_handler(
    State(state): State<AppState>,
    Query(payload): Query<FundsPayload>,
) -> Result<Response, ApiError> {
    let result = explore(state.funds.as_ref(), &payload)?;
    Ok(json_response(StatusCode::OK, result))
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
