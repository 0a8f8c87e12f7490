//! Monthly cost engine
//!
//! [`calculate`] maps one [`CalcInput`] to a [`CalcResult`]. It is pure: no
//! I/O, no clock, no state between calls. Out-of-range numbers (negative,
//! zero, NaN) are clamped rather than rejected, so the function is total over
//! well-typed input.

pub mod input;
pub mod result;

pub use input::{
    CalcInput, CarCondition, CarInput, DepreciationInput, FinanceInput, FixedCostsInput,
    IncomeInput, MaintenanceInput, ServiceLocation, UsageInput,
};
pub use result::{
    Affordability, AffordabilityLevel, CalcResult, DepreciationBreakdown, FixedCostsBreakdown,
    FuelBreakdown, LoanBreakdown, MaintenanceBreakdown, TriggeredRisk,
};

use crate::profiles::{self, RiskItem};

/// Yearly depreciation is capped at this percentage regardless of input
pub const MAX_DEPRECIATION_RATE_PERCENT: f64 = 40.0;
/// Floor that keeps fuel economy away from zero
pub const MIN_KM_PER_LITER: f64 = 0.1;
pub const MIN_HOLD_YEARS: f64 = 0.5;
/// Floor for the income divisor
pub const MIN_MONTHLY_INCOME: f64 = 1.0;

/// Compute the full monthly cost breakdown and affordability verdict
pub fn calculate(input: &CalcInput) -> CalcResult {
    let loan = loan(input);
    let fuel = fuel(input);
    let fixed_costs = fixed_costs(input);
    let depreciation = depreciation(input, loan_car_price(input));
    let maintenance = maintenance(input, fuel.km_per_month);

    let total_per_month = loan.payment_per_month
        + fuel.cost_per_month
        + fixed_costs.per_month
        + depreciation.per_month
        + maintenance.avg_per_month;

    let monthly_income = input.income.monthly_income.max(MIN_MONTHLY_INCOME);
    let ratio = total_per_month / monthly_income;

    CalcResult {
        loan,
        fuel,
        fixed_costs,
        depreciation,
        maintenance,
        affordability: Affordability {
            ratio_to_monthly_income: ratio,
            level: AffordabilityLevel::from_ratio(ratio),
        },
        total_per_month,
    }
}

fn loan_car_price(input: &CalcInput) -> f64 {
    input.finance.car_price.max(0.0)
}

fn loan(input: &CalcInput) -> LoanBreakdown {
    let car_price = loan_car_price(input);
    let down_payment = input.finance.down_payment_amount.max(0.0).min(car_price);
    let down_payment_percent = if car_price > 0.0 {
        down_payment / car_price * 100.0
    } else {
        0.0
    };
    let principal = car_price - down_payment;

    let months = input.finance.months.floor().max(1.0);
    let years = months / 12.0;

    // Flat rate: interest on the original principal for the whole term
    let apr = input.finance.interest_apr_flat.max(0.0) / 100.0;
    let total_interest = principal * apr * years;
    let total_payable = principal + total_interest;

    LoanBreakdown {
        down_payment_amount: down_payment,
        down_payment_percent,
        principal,
        months: months as u32,
        years,
        total_interest,
        total_payable,
        payment_per_month: total_payable / months,
    }
}

fn fuel(input: &CalcInput) -> FuelBreakdown {
    let km_per_month = input.usage.km_per_month.max(0.0);
    let km_per_liter = input.usage.km_per_liter.max(MIN_KM_PER_LITER);
    let liters_per_month = km_per_month / km_per_liter;

    FuelBreakdown {
        km_per_month,
        km_per_liter,
        liters_per_month,
        cost_per_month: liters_per_month * input.usage.fuel_price_per_liter.max(0.0),
    }
}

fn fixed_costs(input: &CalcInput) -> FixedCostsBreakdown {
    let fixed = &input.fixed_costs;
    FixedCostsBreakdown {
        per_month: fixed.insurance_per_year.max(0.0) / 12.0
            + fixed.tax_and_act_per_year.max(0.0) / 12.0
            + fixed.parking_toll_per_month.max(0.0),
    }
}

fn depreciation(input: &CalcInput, car_price: f64) -> DepreciationBreakdown {
    let dep = &input.depreciation;
    let hold_years = dep.hold_years.max(MIN_HOLD_YEARS);
    let hold_months = hold_years * 12.0;

    let expected_resale_price = match dep.expected_resale_price.filter(|price| price.is_finite()) {
        Some(price) => price.max(0.0),
        None => estimate_resale_by_rate(car_price, dep.depreciation_rate_per_year, hold_years),
    };

    DepreciationBreakdown {
        hold_months,
        expected_resale_price,
        per_month: (car_price - expected_resale_price) / hold_months,
    }
}

/// Resale value after `years` of compounding decay at `rate_percent` per year
///
/// The rate is clamped to `0..=40` percent.
pub fn estimate_resale_by_rate(price: f64, rate_percent: f64, years: f64) -> f64 {
    let rate = rate_percent.max(0.0).min(MAX_DEPRECIATION_RATE_PERCENT) / 100.0;
    price * (1.0 - rate).powf(years)
}

fn maintenance(input: &CalcInput, km_per_month: f64) -> MaintenanceBreakdown {
    let profile = profiles::lookup(input.maintenance.profile_key);

    let service_multiplier = input.maintenance.service_location.multiplier();
    let base_service_per_month =
        profile.defaults.base_service_per_year.max(0.0) / 12.0 * service_multiplier;

    let wear = profile.wear_items;
    let wear_per_month = (wear.tires_per_km.max(0.0) + wear.brakes_per_km.max(0.0))
        * km_per_month
        * service_multiplier;

    let condition_multiplier = input.car.condition.risk_multiplier();
    let risk_items: Vec<TriggeredRisk> = profile
        .risk_items
        .iter()
        .filter(|item| is_risk_triggered(item, input.car.year, input.car.mileage_km))
        .map(|item| TriggeredRisk {
            name: item.name.to_string(),
            monthly_reserve: item.average_reserve() * condition_multiplier,
        })
        .collect();

    let risk_reserve_per_month: f64 = risk_items.iter().map(|r| r.monthly_reserve).sum();

    MaintenanceBreakdown {
        base_service_per_month,
        wear_per_month,
        risk_reserve_per_month,
        avg_per_month: base_service_per_month + wear_per_month + risk_reserve_per_month,
        risk_items,
        service_location_multiplier: service_multiplier,
        condition_multiplier,
    }
}

/// Whether every bound present on `item` holds for the car (inclusive)
pub fn is_risk_triggered(item: &RiskItem, car_year: i32, mileage_km: f64) -> bool {
    if item.min_mileage_km.is_some_and(|min| mileage_km < min) {
        return false;
    }
    if item.max_mileage_km.is_some_and(|max| mileage_km > max) {
        return false;
    }
    if item.min_year.is_some_and(|min| car_year < min) {
        return false;
    }
    if item.max_year.is_some_and(|max| car_year > max) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::VehicleModel;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn mileage_item(min: Option<f64>, max: Option<f64>) -> RiskItem {
        RiskItem {
            name: "test",
            min_mileage_km: min,
            max_mileage_km: max,
            min_year: None,
            max_year: None,
            monthly_reserve_min: 100.0,
            monthly_reserve_max: 200.0,
        }
    }

    #[test]
    fn test_loan_example() {
        let result = calculate(&CalcInput::default());

        assert_close(result.loan.principal, 960_000.0);
        assert_close(result.loan.years, 5.0);
        assert_close(result.loan.total_interest, 192_000.0);
        assert_close(result.loan.total_payable, 1_152_000.0);
        assert_close(result.loan.payment_per_month, 19_200.0);
        assert_close(result.loan.down_payment_percent, 20.0);
    }

    #[test]
    fn test_fuel_example() {
        let result = calculate(&CalcInput::default());
        assert_close(result.fuel.liters_per_month, 80.0);
        assert_close(result.fuel.cost_per_month, 2640.0);
    }

    #[test]
    fn test_depreciation_example() {
        let result = calculate(&CalcInput::default());
        // 1,200,000 * 0.88^3
        assert!((result.depreciation.expected_resale_price - 817_766.40).abs() < 0.01);
        assert!((result.depreciation.per_month - 10_617.60).abs() < 0.01);
    }

    #[test]
    fn test_down_payment_capped_at_price() {
        let mut input = CalcInput::default();
        input.finance.down_payment_amount = 2_000_000.0;
        let result = calculate(&input);
        assert_eq!(result.loan.down_payment_amount, 1_200_000.0);
        assert_eq!(result.loan.principal, 0.0);
        assert_eq!(result.loan.payment_per_month, 0.0);

        input.finance.down_payment_amount = -5.0;
        let result = calculate(&input);
        assert_eq!(result.loan.down_payment_amount, 0.0);
        assert_eq!(result.loan.principal, 1_200_000.0);
    }

    #[test]
    fn test_zero_price_has_zero_down_percent() {
        let mut input = CalcInput::default();
        input.finance.car_price = 0.0;
        let result = calculate(&input);
        assert_eq!(result.loan.down_payment_percent, 0.0);
        assert_eq!(result.loan.principal, 0.0);
    }

    #[test]
    fn test_months_coerced_to_at_least_one() {
        for months in [0.0, -12.0, 0.4, f64::NAN] {
            let mut input = CalcInput::default();
            input.finance.months = months;
            let result = calculate(&input);
            assert_eq!(result.loan.months, 1, "months input {months}");
            assert_close(result.loan.payment_per_month, result.loan.total_payable);
        }

        let mut input = CalcInput::default();
        input.finance.months = 36.9;
        assert_eq!(calculate(&input).loan.months, 36);
    }

    #[test]
    fn test_depreciation_rate_capped_at_forty_percent() {
        let mut capped = CalcInput::default();
        capped.depreciation.depreciation_rate_per_year = 50.0;
        let mut forty = CalcInput::default();
        forty.depreciation.depreciation_rate_per_year = 40.0;

        assert_eq!(
            calculate(&capped).depreciation,
            calculate(&forty).depreciation
        );
    }

    #[test]
    fn test_explicit_resale_wins() {
        let mut input = CalcInput::default();
        input.depreciation.expected_resale_price = Some(840_000.0);
        let result = calculate(&input);
        assert_eq!(result.depreciation.expected_resale_price, 840_000.0);
        assert_close(result.depreciation.per_month, 10_000.0);

        input.depreciation.expected_resale_price = Some(-1.0);
        assert_eq!(calculate(&input).depreciation.expected_resale_price, 0.0);

        input.depreciation.expected_resale_price = Some(f64::NAN);
        assert!((calculate(&input).depreciation.expected_resale_price - 817_766.40).abs() < 0.01);
    }

    #[test]
    fn test_hold_years_floor() {
        let mut input = CalcInput::default();
        input.depreciation.hold_years = 0.0;
        assert_eq!(calculate(&input).depreciation.hold_months, 6.0);
    }

    #[test]
    fn test_fuel_floors() {
        let mut input = CalcInput::default();
        input.usage.km_per_liter = 0.0;
        input.usage.km_per_month = 10.0;
        let result = calculate(&input);
        assert_close(result.fuel.liters_per_month, 100.0);

        input.usage.km_per_month = -100.0;
        input.usage.fuel_price_per_liter = -1.0;
        let result = calculate(&input);
        assert_eq!(result.fuel.km_per_month, 0.0);
        assert_eq!(result.fuel.cost_per_month, 0.0);
    }

    #[test]
    fn test_fixed_costs() {
        let result = calculate(&CalcInput::default());
        // 25000/12 + 6000/12 + 1500
        assert_close(result.fixed_costs.per_month, 31000.0 / 12.0 + 1500.0);

        let mut input = CalcInput::default();
        input.fixed_costs.insurance_per_year = -1000.0;
        input.fixed_costs.tax_and_act_per_year = 0.0;
        input.fixed_costs.parking_toll_per_month = 0.0;
        assert_eq!(calculate(&input).fixed_costs.per_month, 0.0);
    }

    #[test]
    fn test_min_mileage_trigger_is_inclusive() {
        let item = mileage_item(Some(100000.0), None);
        assert!(is_risk_triggered(&item, 2010, 100000.0));
        assert!(is_risk_triggered(&item, 2024, 150000.0));
        assert!(!is_risk_triggered(&item, 2010, 99999.0));
    }

    #[test]
    fn test_bounds_are_and_combined() {
        let item = RiskItem {
            min_year: Some(2015),
            max_year: Some(2018),
            ..mileage_item(None, Some(80000.0))
        };
        assert!(is_risk_triggered(&item, 2015, 80000.0));
        assert!(is_risk_triggered(&item, 2018, 0.0));
        assert!(!is_risk_triggered(&item, 2019, 50000.0));
        assert!(!is_risk_triggered(&item, 2014, 50000.0));
        assert!(!is_risk_triggered(&item, 2016, 80001.0));
    }

    #[test]
    fn test_unbounded_item_always_triggers() {
        let item = mileage_item(None, None);
        assert!(is_risk_triggered(&item, 1990, 0.0));
    }

    #[test]
    fn test_default_input_maintenance() {
        // F30 320d at 120,000 km triggers suspension and cooling, not EGR/DPF
        let result = calculate(&CalcInput::default());
        let names: Vec<&str> = result
            .maintenance
            .risk_items
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Suspension / bushings / ball joints",
                "Cooling system / water pump (reserve)"
            ]
        );
        assert_close(result.maintenance.risk_reserve_per_month, 1150.0 + 900.0);
        assert_close(result.maintenance.base_service_per_month, 1500.0);
        assert_close(result.maintenance.wear_per_month, (0.35 + 0.18) * 1200.0);
    }

    #[test]
    fn test_year_bounded_risk_uses_model_year() {
        let mut input = CalcInput::for_model(VehicleModel::G20_330e);
        input.car.mileage_km = 10_000.0;

        input.car.year = 2019;
        let names: Vec<String> = calculate(&input)
            .maintenance
            .risk_items
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Battery / hybrid system (reserve)".to_string()]);

        input.car.year = 2020;
        assert!(calculate(&input).maintenance.risk_items.is_empty());
    }

    #[test]
    fn test_poor_condition_scales_reserves() {
        let normal = calculate(&CalcInput::default());
        let mut input = CalcInput::default();
        input.car.condition = CarCondition::Poor;
        let poor = calculate(&input);

        for (n, p) in normal
            .maintenance
            .risk_items
            .iter()
            .zip(poor.maintenance.risk_items.iter())
        {
            assert_eq!(p.monthly_reserve, n.monthly_reserve * 1.5);
        }
        assert_eq!(
            poor.maintenance.base_service_per_month,
            normal.maintenance.base_service_per_month
        );
    }

    #[test]
    fn test_outside_service_scales_base_and_wear_only() {
        let center = calculate(&CalcInput::default());
        let mut input = CalcInput::default();
        input.maintenance.service_location = ServiceLocation::Outside;
        let outside = calculate(&input);

        assert_close(
            outside.maintenance.base_service_per_month,
            center.maintenance.base_service_per_month * 0.65,
        );
        assert_close(
            outside.maintenance.wear_per_month,
            center.maintenance.wear_per_month * 0.65,
        );
        assert_eq!(
            outside.maintenance.risk_reserve_per_month,
            center.maintenance.risk_reserve_per_month
        );
    }

    #[test]
    fn test_profile_comes_from_maintenance_key() {
        let mut input = CalcInput::default();
        input.maintenance.profile_key = VehicleModel::G01X3_20d;
        let result = calculate(&input);
        assert_close(result.maintenance.base_service_per_month, 2000.0);
    }

    #[test]
    fn test_total_and_affordability() {
        let result = calculate(&CalcInput::default());
        let [loan, fuel, fixed, dep, maint] = result.monthly_components();
        assert_eq!(result.total_per_month, loan + fuel + fixed + dep + maint);
        assert_eq!(
            result.affordability.ratio_to_monthly_income,
            result.total_per_month / 40000.0
        );
        assert_eq!(result.affordability.level, AffordabilityLevel::Risky);
    }

    #[test]
    fn test_income_floor() {
        let mut input = CalcInput::default();
        input.income.monthly_income = 0.0;
        let result = calculate(&input);
        assert_eq!(result.affordability.ratio_to_monthly_income, result.total_per_month);

        input.income.monthly_income = -500.0;
        let result = calculate(&input);
        assert_eq!(result.affordability.ratio_to_monthly_income, result.total_per_month);
    }

    #[test]
    fn test_affordable_with_high_income() {
        let mut input = CalcInput::default();
        input.income.monthly_income = 1_000_000.0;
        assert_eq!(calculate(&input).affordability.level, AffordabilityLevel::Affordable);
    }
}
