use anyhow::{Context, Result};
use car_cost_advisor::{
    calculator::{calculate, AffordabilityLevel, CalcInput, CalcResult},
    profiles::VehicleModel,
};
use colored::Colorize;
use std::path::Path;

/// Execute the calc command
///
/// Reads a full input from `input`, or builds the default input for
/// `model`, then prints the breakdown.
pub fn execute(input: Option<&Path>, model: Option<&str>, json: bool) -> Result<()> {
    let input = load_input(input, model)?;
    let result = calculate(&input);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_breakdown(&input, &result);
    }

    Ok(())
}

fn load_input(path: Option<&Path>, model: Option<&str>) -> Result<CalcInput> {
    if let Some(path) = path {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("Invalid calculator input in {}", path.display()));
    }

    let model = match model {
        Some(key) => key.parse::<VehicleModel>()?,
        None => VehicleModel::default(),
    };
    Ok(CalcInput::for_model(model))
}

fn baht(value: f64) -> String {
    format!("{:>12.2} THB", value)
}

fn print_breakdown(input: &CalcInput, result: &CalcResult) {
    let profile = input.maintenance.profile_key.profile();

    println!("{}", profile.display_name.bold());
    println!(
        "  {} model year, {:.0} km, {:?} condition",
        input.car.year, input.car.mileage_km, input.car.condition
    );
    println!();

    println!("{}", "Monthly costs:".bold());
    println!(
        "  Loan payment   {}  ({} months, principal {:.2})",
        baht(result.loan.payment_per_month),
        result.loan.months,
        result.loan.principal
    );
    println!(
        "  Fuel           {}  ({:.1} L/month)",
        baht(result.fuel.cost_per_month),
        result.fuel.liters_per_month
    );
    println!("  Fixed costs    {}", baht(result.fixed_costs.per_month));
    println!(
        "  Depreciation   {}  (resale {:.2} after {} months)",
        baht(result.depreciation.per_month),
        result.depreciation.expected_resale_price,
        result.depreciation.hold_months
    );
    println!("  Maintenance    {}", baht(result.maintenance.avg_per_month));
    println!("  {}", "-".repeat(30));
    println!("  Total          {}", baht(result.total_per_month).bold());
    println!();

    if !result.maintenance.risk_items.is_empty() {
        println!("{}", "Risk reserves:".bold());
        for risk in &result.maintenance.risk_items {
            println!("  {:<40} {}", risk.name, baht(risk.monthly_reserve));
        }
        println!();
    }

    let ratio = format!(
        "{:.1}% of monthly income ({})",
        result.affordability.ratio_to_monthly_income * 100.0,
        result.affordability.level
    );
    let ratio = match result.affordability.level {
        AffordabilityLevel::Affordable => ratio.green(),
        AffordabilityLevel::Tight => ratio.yellow(),
        AffordabilityLevel::Risky => ratio.red(),
    };
    println!("{} {}", "Affordability:".bold(), ratio);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_input_defaults_for_model() {
        let input = load_input(None, Some("f10_520d")).unwrap();
        assert_eq!(input.car.model_key, VehicleModel::F10_520d);
        assert_eq!(input.maintenance.profile_key, VehicleModel::F10_520d);
    }

    #[test]
    fn test_load_input_unknown_model() {
        let err = load_input(None, Some("E90_320I")).unwrap_err();
        assert!(err.to_string().contains("Unknown vehicle profile"));
    }

    #[test]
    fn test_load_input_from_file() {
        let mut input = CalcInput::for_model(VehicleModel::F30_328i);
        input.usage.km_per_month = 2000.0;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&input).unwrap()).unwrap();

        assert_eq!(load_input(Some(file.path()), None).unwrap(), input);
    }
}
