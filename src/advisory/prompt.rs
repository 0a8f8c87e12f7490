//! Prompt text for the advisory calls
//!
//! The current year is passed in by the caller so that prompt output is
//! deterministic under test.

use super::payload::{AnalysisPayload, PrefillPayload};
use crate::calculator::{CarCondition, ServiceLocation};

pub fn analysis_system_prompt() -> &'static str {
    "You are a personal-finance advisor and BMW specialist in Thailand. \
     Give neutral, practical advice."
}

pub fn prefill_system_prompt(language: &str) -> String {
    format!(
        "You are a BMW running-cost specialist in Thailand. \
         Reply with cost suggestions as JSON. Write free text in {}.",
        language
    )
}

/// Thousands-separated amount with at most two decimals, e.g. `1,234.5`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if cents > 0 {
        let fraction = format!("{:02}", cents);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

fn condition_label(condition: CarCondition) -> &'static str {
    match condition {
        CarCondition::Excellent => "excellent",
        CarCondition::Normal => "normal",
        CarCondition::Poor => "poor",
    }
}

fn location_label(location: ServiceLocation) -> &'static str {
    match location {
        ServiceLocation::Center => "dealer service center",
        ServiceLocation::Outside => "independent garage",
    }
}

/// User prompt for the analyze call
pub fn analysis_prompt(payload: &AnalysisPayload, current_year: i32, language: &str) -> String {
    let profile = payload.model_key.profile();
    let model = profile.display_name;
    let year = payload.year;
    let car_age = current_year.saturating_sub(year);
    let ratio_percent = format!("{:.1}", payload.ratio_to_income * 100.0);
    let level = payload.affordability_level;

    let monthly_income = format_amount(payload.monthly_income);
    let annual_income = format_amount(payload.annual_income);
    let mileage = format_amount(payload.mileage_km);
    let condition = condition_label(payload.car_condition);
    let price = format_amount(payload.car_price);
    let down_payment = format_amount(payload.down_payment_amount);
    let down_percent = payload.down_payment_percent();
    let months = payload.months;
    let apr = payload.interest_apr_flat;
    let km_per_month = payload.km_per_month;
    let km_per_liter = payload.km_per_liter;
    let fuel_price = payload.fuel_price;
    let location = location_label(payload.service_location);
    let loan = format_amount(payload.payment_per_month);
    let fuel = format_amount(payload.fuel_cost_per_month);
    let maintenance = format_amount(payload.maintenance_per_month);
    let depreciation = format_amount(payload.depreciation_per_month);
    let fixed = format_amount(payload.fixed_costs_per_month);
    let total = format_amount(payload.total_per_month);

    format!(
        r#"You are a personal-finance advisor and BMW specialist in Thailand.

## Buyer
- Monthly income: {monthly_income} THB
- Annual income: {annual_income} THB

## Car
- Model: {model}
- Age: {car_age} years (model year {year})
- Current mileage: {mileage} km
- Condition: {condition}
- Price: {price} THB
- Down payment: {down_payment} THB ({down_percent:.0}%)
- Term: {months} months
- Interest: {apr}% per year (flat rate)

## Usage
- Distance per month: {km_per_month} km
- Fuel economy: {km_per_liter} km/L
- Fuel price: {fuel_price} THB/litre
- Servicing: {location}

## Computed monthly costs
- Loan payment: {loan} THB
- Fuel: {fuel} THB
- Maintenance: {maintenance} THB
- Depreciation: {depreciation} THB
- Fixed costs (insurance + tax + parking): {fixed} THB
- **Total: {total} THB/month**

## Calculator verdict
- Share of income: {ratio_percent}%
- Affordability level: {level}

## Questions
With an income of {monthly_income} THB/month and car costs of {total} THB/month ({ratio_percent}% of income):

1. Should the buyer purchase this car? Why?
2. Which risks should they watch out for?
3. What else do you recommend?
4. The calculator says "{level}". If the buyer still wants the car, what should they consider?

Reply with JSON in this shape:
{{
  "verdict": "buy" | "reconsider" | "do-not-buy",
  "confidence": number 0-100,
  "summary": "one or two plain sentences",
  "detailedAnalysis": "detailed reasoning",
  "risks": ["risk 1", "risk 2", ...],
  "recommendations": ["recommendation 1", ...],
  "comparisonWithStandard": "comparison with the usual guideline of 20-30% of income"
}}

Important: write all free text in {language}. Output nothing except the JSON."#
    )
}

/// User prompt for the prefill call
pub fn prefill_prompt(payload: &PrefillPayload, current_year: i32, language: &str) -> String {
    let profile = payload.model_key.profile();
    let model = profile.display_name;
    let year = payload.year;
    let car_age = current_year.saturating_sub(year);
    let condition = condition_label(payload.car_condition.unwrap_or_default());
    let location = location_label(payload.service_location.unwrap_or_default());

    let mileage = format_amount(payload.mileage_km);
    let km_per_month = payload.km_per_month;
    let price = format_amount(payload.car_price);
    let income = format_amount(payload.monthly_income);
    let default_km_per_liter = profile.defaults.km_per_liter;
    let default_rate = profile.defaults.depreciation_rate_per_year;
    let base_service = format_amount(profile.defaults.base_service_per_year);

    format!(
        r#"You estimate BMW running costs in Thailand.

Car:
- Model: {model}
- Year: {year} ({car_age} years old)
- Current mileage: {mileage} km
- Usage: {km_per_month} km/month
- Price: {price} THB
- Buyer income: {income} THB/month
- Condition: {condition}
- Servicing: {location}

Profile defaults:
- km/L: {default_km_per_liter}
- Depreciation %/year: {default_rate}
- Base service per year: {base_service} THB

Produce this JSON:
{{
  "kmPerLiter": <number>,
  "insurancePerYear": <number>,
  "depreciationRatePerYear": <number>,
  "parkingTollPerMonth": <number>,
  "explanation": "two or three sentences on why you chose these values"
}}

Guidance:
- kmPerLiter: a {car_age} year old car in {condition} condition (default {default_km_per_liter})
- insurancePerYear: cover for a {car_age} year old car priced {price} THB (range 15,000-60,000 THB)
- depreciationRatePerYear: for a {car_age} year old car (range 8-18%)
- parkingTollPerMonth: parking and tolls suited to an income of {income} THB/month

Write the explanation in {language}. Output nothing except the JSON."#
    )
}
