use serde::{Deserialize, Serialize};

use crate::profiles::VehicleModel;

/// Overall condition of the car, scales the risk reserve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarCondition {
    Excellent,
    #[default]
    Normal,
    Poor,
}

impl CarCondition {
    pub fn risk_multiplier(&self) -> f64 {
        match self {
            CarCondition::Excellent => 0.7,
            CarCondition::Normal => 1.0,
            CarCondition::Poor => 1.5,
        }
    }
}

/// Where the car gets serviced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLocation {
    /// Dealer service center
    #[default]
    Center,
    /// Independent garage
    Outside,
}

impl ServiceLocation {
    /// Applies to base service and wear, not to risk reserves
    pub fn multiplier(&self) -> f64 {
        match self {
            ServiceLocation::Center => 1.0,
            ServiceLocation::Outside => 0.65,
        }
    }
}

/// Everything the engine needs for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcInput {
    pub income: IncomeInput,
    pub finance: FinanceInput,
    pub car: CarInput,
    pub usage: UsageInput,
    pub fixed_costs: FixedCostsInput,
    pub depreciation: DepreciationInput,
    pub maintenance: MaintenanceInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeInput {
    pub monthly_income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<f64>,
}

impl IncomeInput {
    /// Stated annual income, or twelve months of monthly income when absent
    pub fn effective_annual(&self) -> f64 {
        match self.annual_income {
            Some(annual) if annual.is_finite() && annual > 0.0 => annual,
            _ => self.monthly_income.max(0.0) * 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceInput {
    pub car_price: f64,
    pub down_payment_amount: f64,
    pub months: f64,
    /// Percent per year, flat
    pub interest_apr_flat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarInput {
    pub model_key: VehicleModel,
    /// Model year
    pub year: i32,
    pub mileage_km: f64,
    #[serde(default)]
    pub condition: CarCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageInput {
    pub km_per_month: f64,
    pub fuel_price_per_liter: f64,
    pub km_per_liter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedCostsInput {
    pub insurance_per_year: f64,
    pub tax_and_act_per_year: f64,
    pub parking_toll_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationInput {
    pub hold_years: f64,
    /// When absent the resale value is derived from the yearly rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_resale_price: Option<f64>,
    /// Percent per year
    pub depreciation_rate_per_year: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceInput {
    pub profile_key: VehicleModel,
    #[serde(default)]
    pub service_location: ServiceLocation,
}

impl CalcInput {
    /// Default form values for a model, seeded from its profile
    pub fn for_model(model: VehicleModel) -> Self {
        let defaults = model.profile().defaults;

        Self {
            income: IncomeInput {
                monthly_income: 40000.0,
                annual_income: None,
            },
            finance: FinanceInput {
                car_price: 1_200_000.0,
                down_payment_amount: 240_000.0,
                months: 60.0,
                interest_apr_flat: 4.0,
            },
            car: CarInput {
                model_key: model,
                year: 2016,
                mileage_km: 120_000.0,
                condition: CarCondition::Normal,
            },
            usage: UsageInput {
                km_per_month: 1200.0,
                fuel_price_per_liter: 33.0,
                km_per_liter: defaults.km_per_liter,
            },
            fixed_costs: FixedCostsInput {
                insurance_per_year: 25000.0,
                tax_and_act_per_year: 6000.0,
                parking_toll_per_month: 1500.0,
            },
            depreciation: DepreciationInput {
                hold_years: 3.0,
                expected_resale_price: None,
                depreciation_rate_per_year: defaults.depreciation_rate_per_year,
            },
            maintenance: MaintenanceInput {
                profile_key: model,
                service_location: ServiceLocation::Center,
            },
        }
    }

    /// Switch to another model, resetting fuel economy and depreciation
    /// rate to that model's defaults
    pub fn apply_model_defaults(&mut self, model: VehicleModel) {
        let defaults = model.profile().defaults;
        self.car.model_key = model;
        self.maintenance.profile_key = model;
        self.usage.km_per_liter = defaults.km_per_liter;
        self.depreciation.depreciation_rate_per_year = defaults.depreciation_rate_per_year;
    }
}

impl Default for CalcInput {
    fn default() -> Self {
        Self::for_model(VehicleModel::default())
    }
}
