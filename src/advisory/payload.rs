use serde::{Deserialize, Serialize};

use crate::calculator::{AffordabilityLevel, CalcInput, CalcResult, CarCondition, ServiceLocation};
use crate::profiles::VehicleModel;

/// Flat record sent to the analyze endpoint: every input plus the monthly
/// figures and affordability verdict computed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    pub model_key: VehicleModel,
    pub year: i32,
    pub mileage_km: f64,
    pub km_per_month: f64,
    pub monthly_income: f64,
    pub annual_income: f64,
    pub car_price: f64,
    pub down_payment_amount: f64,
    pub months: f64,
    pub interest_apr_flat: f64,
    pub fuel_price: f64,
    pub km_per_liter: f64,
    pub insurance_per_year: f64,
    pub tax_and_act_per_year: f64,
    pub parking_toll_per_month: f64,
    pub hold_years: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_resale_price: Option<f64>,
    pub depreciation_rate_per_year: f64,
    pub car_condition: CarCondition,
    pub service_location: ServiceLocation,
    pub total_per_month: f64,
    pub payment_per_month: f64,
    pub fuel_cost_per_month: f64,
    pub maintenance_per_month: f64,
    pub depreciation_per_month: f64,
    pub fixed_costs_per_month: f64,
    pub ratio_to_income: f64,
    pub affordability_level: AffordabilityLevel,
}

impl AnalysisPayload {
    pub fn new(input: &CalcInput, result: &CalcResult) -> Self {
        Self {
            model_key: input.car.model_key,
            year: input.car.year,
            mileage_km: input.car.mileage_km,
            km_per_month: input.usage.km_per_month,
            monthly_income: input.income.monthly_income,
            annual_income: input.income.effective_annual(),
            car_price: input.finance.car_price,
            down_payment_amount: input.finance.down_payment_amount,
            months: input.finance.months,
            interest_apr_flat: input.finance.interest_apr_flat,
            fuel_price: input.usage.fuel_price_per_liter,
            km_per_liter: input.usage.km_per_liter,
            insurance_per_year: input.fixed_costs.insurance_per_year,
            tax_and_act_per_year: input.fixed_costs.tax_and_act_per_year,
            parking_toll_per_month: input.fixed_costs.parking_toll_per_month,
            hold_years: input.depreciation.hold_years,
            expected_resale_price: input.depreciation.expected_resale_price,
            depreciation_rate_per_year: input.depreciation.depreciation_rate_per_year,
            car_condition: input.car.condition,
            service_location: input.maintenance.service_location,
            total_per_month: result.total_per_month,
            payment_per_month: result.loan.payment_per_month,
            fuel_cost_per_month: result.fuel.cost_per_month,
            maintenance_per_month: result.maintenance.avg_per_month,
            depreciation_per_month: result.depreciation.per_month,
            fixed_costs_per_month: result.fixed_costs.per_month,
            ratio_to_income: result.affordability.ratio_to_monthly_income,
            affordability_level: result.affordability.level,
        }
    }

    /// Down payment as a share of the price, 0 when the price is not positive
    pub fn down_payment_percent(&self) -> f64 {
        if self.car_price > 0.0 {
            self.down_payment_amount / self.car_price * 100.0
        } else {
            0.0
        }
    }
}

/// Vehicle and usage facts for the prefill endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillPayload {
    pub model_key: VehicleModel,
    pub year: i32,
    pub mileage_km: f64,
    pub km_per_month: f64,
    pub monthly_income: f64,
    pub car_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_condition: Option<CarCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_location: Option<ServiceLocation>,
}

impl PrefillPayload {
    pub fn from_input(input: &CalcInput) -> Self {
        Self {
            model_key: input.car.model_key,
            year: input.car.year,
            mileage_km: input.car.mileage_km,
            km_per_month: input.usage.km_per_month,
            monthly_income: input.income.monthly_income,
            car_price: input.finance.car_price,
            car_condition: Some(input.car.condition),
            service_location: Some(input.maintenance.service_location),
        }
    }
}

/// Advisory defaults the caller may merge into a later input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedInputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km_per_liter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_per_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_rate_per_year: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_toll_per_month: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl SuggestedInputs {
    /// At least one numeric suggestion is present and non-zero
    pub fn has_values(&self) -> bool {
        [
            self.km_per_liter,
            self.insurance_per_year,
            self.depreciation_rate_per_year,
            self.parking_toll_per_month,
        ]
        .iter()
        .any(|value| value.is_some_and(|v| v != 0.0))
    }

    /// Overwrite the matching input fields with the suggestions present
    pub fn apply_to(&self, input: &mut CalcInput) {
        if let Some(km_per_liter) = self.km_per_liter {
            input.usage.km_per_liter = km_per_liter;
        }
        if let Some(insurance) = self.insurance_per_year {
            input.fixed_costs.insurance_per_year = insurance;
        }
        if let Some(rate) = self.depreciation_rate_per_year {
            input.depreciation.depreciation_rate_per_year = rate;
        }
        if let Some(parking) = self.parking_toll_per_month {
            input.fixed_costs.parking_toll_per_month = parking;
        }
    }
}
