use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum FundType {
    Equity,
    Debt,
    Hybrid,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum FundSort {
    #[default]
    Returns,
    Aum,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailingReturns {
    #[serde(rename = "1Y")]
    pub one_year: f64,
    #[serde(rename = "3Y")]
    pub three_year: f64,
    #[serde(rename = "5Y")]
    pub five_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub fund_type: FundType,
    pub category: String,
    pub returns: TrailingReturns,
    pub risk_level: RiskLevel,
    pub min_investment: f64,
    pub expense_ratio: f64,
    /// Crores.
    pub aum: f64,
    pub rating: u8,
}

pub trait FundProvider {
    fn funds(&self) -> &[Fund];
}

#[derive(Debug, Clone)]
pub struct StaticFunds {
    funds: Vec<Fund>,
}

impl StaticFunds {
    pub fn new(funds: Vec<Fund>) -> Self {
        Self { funds }
    }

    pub fn sample() -> Self {
        fn fund(
            id: &str,
            name: &str,
            fund_type: FundType,
            category: &str,
            returns: (f64, f64, f64),
            risk_level: RiskLevel,
            min_investment: f64,
            expense_ratio: f64,
            aum: f64,
            rating: u8,
        ) -> Fund {
            Fund {
                id: id.to_string(),
                name: name.to_string(),
                fund_type,
                category: category.to_string(),
                returns: TrailingReturns {
                    one_year: returns.0,
                    three_year: returns.1,
                    five_year: returns.2,
                },
                risk_level,
                min_investment,
                expense_ratio,
                aum,
                rating,
            }
        }

        #[rustfmt::skip]
        let funds = vec![
            fund("1", "Axis Bluechip Fund", FundType::Equity, "Large Cap",
                (15.2, 12.8, 14.1), RiskLevel::High, 500.0, 1.85, 28_500.0, 4),
            fund("2", "HDFC Corporate Bond Fund", FundType::Debt, "Corporate Bond",
                (8.1, 7.8, 8.2), RiskLevel::Low, 100.0, 0.45, 15_200.0, 5),
            fund("3", "ICICI Balanced Advantage Fund", FundType::Hybrid, "Dynamic Asset Allocation",
                (11.8, 10.2, 11.5), RiskLevel::Moderate, 100.0, 1.05, 22_100.0, 4),
            fund("4", "SBI Small Cap Fund", FundType::Equity, "Small Cap",
                (22.5, 18.2, 16.8), RiskLevel::VeryHigh, 500.0, 1.95, 8_900.0, 3),
            fund("5", "Kotak Liquid Fund", FundType::Debt, "Liquid",
                (6.2, 6.1, 6.8), RiskLevel::Low, 1_000.0, 0.25, 45_600.0, 5),
            fund("6", "Mirae Asset Large Cap Fund", FundType::Equity, "Large Cap",
                (14.8, 13.2, 15.1), RiskLevel::High, 1_000.0, 1.75, 18_700.0, 4),
        ];
        Self::new(funds)
    }
}

impl FundProvider for StaticFunds {
    fn funds(&self) -> &[Fund] {
        &self.funds
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FundQuery {
    pub fund_type: Option<FundType>,
    pub risk_level: Option<RiskLevel>,
    pub sort_by: FundSort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub fund_type: FundType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRow {
    pub name: String,
    #[serde(rename = "1Y")]
    pub one_year: f64,
    #[serde(rename = "3Y")]
    pub three_year: f64,
    #[serde(rename = "5Y")]
    pub five_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundExplorerResult {
    pub funds: Vec<Fund>,
    pub type_distribution: Vec<TypeCount>,
    pub performance_comparison: Vec<PerformanceRow>,
}

const COMPARISON_LIMIT: usize = 5;

pub fn explore_funds(provider: &dyn FundProvider, query: &FundQuery) -> FundExplorerResult {
    let catalogue = provider.funds();

    let mut funds: Vec<Fund> = catalogue
        .iter()
        .filter(|f| query.fund_type.is_none_or(|t| f.fund_type == t))
        .filter(|f| query.risk_level.is_none_or(|r| f.risk_level == r))
        .cloned()
        .collect();

    match query.sort_by {
        FundSort::Returns => {
            funds.sort_by(|a, b| b.returns.three_year.total_cmp(&a.returns.three_year))
        }
        FundSort::Aum => funds.sort_by(|a, b| b.aum.total_cmp(&a.aum)),
        FundSort::Rating => funds.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }

    let mut type_distribution: Vec<TypeCount> = Vec::new();
    for fund in catalogue {
        match type_distribution
            .iter_mut()
            .find(|c| c.fund_type == fund.fund_type)
        {
            Some(entry) => entry.count += 1,
            None => type_distribution.push(TypeCount {
                fund_type: fund.fund_type,
                count: 1,
            }),
        }
    }

    let performance_comparison = funds
        .iter()
        .take(COMPARISON_LIMIT)
        .map(|f| PerformanceRow {
            name: f.name.split(' ').take(2).collect::<Vec<_>>().join(" "),
            one_year: f.returns.one_year,
            three_year: f.returns.three_year,
            five_year: f.returns.five_year,
        })
        .collect();

    FundExplorerResult {
        funds,
        type_distribution,
        performance_comparison,
    }
}
