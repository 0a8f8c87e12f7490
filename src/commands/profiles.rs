use anyhow::Result;
use car_cost_advisor::profiles::{self, VehicleModel, VehicleProfile};
use colored::Colorize;

/// Execute the profiles command
pub fn execute(key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            let model: VehicleModel = key.parse()?;
            print_profile(model, profiles::lookup(model));
        }
        None => {
            for model in VehicleModel::ALL {
                print_profile(model, profiles::lookup(model));
                println!();
            }
        }
    }
    Ok(())
}

fn bound<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_profile(model: VehicleModel, profile: &VehicleProfile) {
    println!("{} {}", model.key().cyan().bold(), profile.display_name.bold());
    println!("  {}", profile.notes.dimmed());
    println!(
        "  Defaults: {} km/L, {}%/year depreciation, {} THB/year base service",
        profile.defaults.km_per_liter,
        profile.defaults.depreciation_rate_per_year,
        profile.defaults.base_service_per_year
    );
    println!(
        "  Wear: tires {} THB/km, brakes {} THB/km",
        profile.wear_items.tires_per_km, profile.wear_items.brakes_per_km
    );
    for item in profile.risk_items {
        println!(
            "  - {:<40} mileage {}..{} year {}..{}  {}-{} THB/month",
            item.name,
            bound(item.min_mileage_km),
            bound(item.max_mileage_km),
            bound(item.min_year),
            bound(item.max_year),
            item.monthly_reserve_min,
            item.monthly_reserve_max
        );
    }
}
