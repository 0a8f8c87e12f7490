use serde::{Deserialize, Serialize};
use std::fmt;

/// Affordability band for the cost-to-income ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordabilityLevel {
    /// ratio <= 0.18
    Affordable,
    /// 0.18 < ratio <= 0.28
    Tight,
    /// ratio > 0.28
    Risky,
}

impl AffordabilityLevel {
    pub const AFFORDABLE_MAX_RATIO: f64 = 0.18;
    pub const TIGHT_MAX_RATIO: f64 = 0.28;

    /// Each band includes its upper boundary
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= Self::AFFORDABLE_MAX_RATIO {
            AffordabilityLevel::Affordable
        } else if ratio <= Self::TIGHT_MAX_RATIO {
            AffordabilityLevel::Tight
        } else {
            AffordabilityLevel::Risky
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AffordabilityLevel::Affordable => "affordable",
            AffordabilityLevel::Tight => "tight",
            AffordabilityLevel::Risky => "risky",
        }
    }
}

impl fmt::Display for AffordabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full monthly cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcResult {
    pub loan: LoanBreakdown,
    pub fuel: FuelBreakdown,
    pub fixed_costs: FixedCostsBreakdown,
    pub depreciation: DepreciationBreakdown,
    pub maintenance: MaintenanceBreakdown,
    pub affordability: Affordability,
    /// Loan payment + fuel + fixed costs + depreciation + maintenance average
    pub total_per_month: f64,
}

impl CalcResult {
    /// The five figures that make up the monthly total, in summation order
    pub fn monthly_components(&self) -> [f64; 5] {
        [
            self.loan.payment_per_month,
            self.fuel.cost_per_month,
            self.fixed_costs.per_month,
            self.depreciation.per_month,
            self.maintenance.avg_per_month,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBreakdown {
    pub down_payment_amount: f64,
    pub down_payment_percent: f64,
    pub principal: f64,
    pub months: u32,
    pub years: f64,
    pub total_interest: f64,
    pub total_payable: f64,
    pub payment_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelBreakdown {
    pub km_per_month: f64,
    pub km_per_liter: f64,
    pub liters_per_month: f64,
    pub cost_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedCostsBreakdown {
    pub per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationBreakdown {
    pub hold_months: f64,
    pub expected_resale_price: f64,
    pub per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceBreakdown {
    pub base_service_per_month: f64,
    pub wear_per_month: f64,
    pub risk_reserve_per_month: f64,
    pub avg_per_month: f64,
    pub risk_items: Vec<TriggeredRisk>,
    pub service_location_multiplier: f64,
    pub condition_multiplier: f64,
}

/// A risk item that applies to this car, with its resolved reserve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredRisk {
    pub name: String,
    pub monthly_reserve: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    pub ratio_to_monthly_income: f64,
    pub level: AffordabilityLevel,
}
