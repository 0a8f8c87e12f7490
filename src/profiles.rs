//! Vehicle profile table
//!
//! Static reference data for every supported model: fuel and depreciation
//! defaults, base service cost, per-kilometre wear rates and the risk items
//! that start reserving money once a car crosses an age or mileage threshold.
//! All amounts are in baht.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProfileError;

/// Supported vehicle models
///
/// The set is closed: adding a model means adding a variant and a profile,
/// and the compiler checks that [`VehicleModel::profile`] covers it.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleModel {
    #[serde(rename = "F30_320D")]
    F30_320d,
    #[serde(rename = "F30_328I")]
    F30_328i,
    #[serde(rename = "G20_330E")]
    G20_330e,
    #[serde(rename = "F10_520D")]
    F10_520d,
    #[serde(rename = "F48_X1_20D")]
    F48X1_20d,
    #[serde(rename = "G01_X3_20D")]
    G01X3_20d,
}

impl VehicleModel {
    pub const ALL: [VehicleModel; 6] = [
        VehicleModel::F30_320d,
        VehicleModel::F30_328i,
        VehicleModel::G20_330e,
        VehicleModel::F10_520d,
        VehicleModel::F48X1_20d,
        VehicleModel::G01X3_20d,
    ];

    /// Wire key, e.g. `F30_320D`
    pub fn key(&self) -> &'static str {
        match self {
            VehicleModel::F30_320d => "F30_320D",
            VehicleModel::F30_328i => "F30_328I",
            VehicleModel::G20_330e => "G20_330E",
            VehicleModel::F10_520d => "F10_520D",
            VehicleModel::F48X1_20d => "F48_X1_20D",
            VehicleModel::G01X3_20d => "G01_X3_20D",
        }
    }

    /// Profile for this model
    pub fn profile(&self) -> &'static VehicleProfile {
        match self {
            VehicleModel::F30_320d => &F30_320D,
            VehicleModel::F30_328i => &F30_328I,
            VehicleModel::G20_330e => &G20_330E,
            VehicleModel::F10_520d => &F10_520D,
            VehicleModel::F48X1_20d => &F48_X1_20D,
            VehicleModel::G01X3_20d => &G01_X3_20D,
        }
    }
}

impl Default for VehicleModel {
    fn default() -> Self {
        VehicleModel::F30_320d
    }
}

impl fmt::Display for VehicleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for VehicleModel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleModel::ALL
            .iter()
            .copied()
            .find(|model| model.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProfileError::UnknownProfile(s.to_string()))
    }
}

/// Per-model reference record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProfile {
    pub display_name: &'static str,
    pub notes: &'static str,
    pub defaults: ProfileDefaults,
    pub wear_items: WearItems,
    pub risk_items: &'static [RiskItem],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDefaults {
    pub km_per_liter: f64,
    /// Percent per year
    pub depreciation_rate_per_year: f64,
    pub base_service_per_year: f64,
}

/// Average wear cost per kilometre driven
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WearItems {
    pub tires_per_km: f64,
    pub brakes_per_km: f64,
}

/// Conditional maintenance reserve
///
/// Triggered when every bound that is present holds (inclusive). A missing
/// bound never excludes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_mileage_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_mileage_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    pub monthly_reserve_min: f64,
    pub monthly_reserve_max: f64,
}

impl RiskItem {
    /// Item bounded only by a minimum mileage
    pub const fn above_mileage(
        name: &'static str,
        min_mileage_km: f64,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            name,
            min_mileage_km: Some(min_mileage_km),
            max_mileage_km: None,
            min_year: None,
            max_year: None,
            monthly_reserve_min: min,
            monthly_reserve_max: max,
        }
    }

    /// Midpoint of the reserve range
    pub fn average_reserve(&self) -> f64 {
        (self.monthly_reserve_min + self.monthly_reserve_max) / 2.0
    }
}

/// Resolve a profile by model
pub fn lookup(model: VehicleModel) -> &'static VehicleProfile {
    model.profile()
}

/// Resolve a profile by wire key
///
/// An unknown key is a caller error and never falls back to another profile.
pub fn lookup_key(key: &str) -> Result<&'static VehicleProfile, ProfileError> {
    key.parse::<VehicleModel>().map(lookup)
}

static F30_320D: VehicleProfile = VehicleProfile {
    display_name: "BMW 3 Series F30 320d (Diesel)",
    notes: "Economical diesel, but budget for wear, servicing and mileage-related risks.",
    defaults: ProfileDefaults {
        km_per_liter: 15.0,
        depreciation_rate_per_year: 12.0,
        base_service_per_year: 18000.0,
    },
    // tyres ~28k per 80k km, pads/discs ~18k per 100k km
    wear_items: WearItems {
        tires_per_km: 0.35,
        brakes_per_km: 0.18,
    },
    risk_items: &[
        RiskItem::above_mileage("Suspension / bushings / ball joints", 100000.0, 800.0, 1500.0),
        RiskItem::above_mileage("Cooling system / water pump (reserve)", 120000.0, 600.0, 1200.0),
        RiskItem::above_mileage("EGR / DPF (reserve)", 140000.0, 700.0, 1600.0),
    ],
};

static F30_328I: VehicleProfile = VehicleProfile {
    display_name: "BMW 3 Series F30 328i (Petrol)",
    notes: "More power and higher fuel use; reserve extra for cooling system and water pump.",
    defaults: ProfileDefaults {
        km_per_liter: 10.5,
        depreciation_rate_per_year: 12.0,
        base_service_per_year: 20000.0,
    },
    wear_items: WearItems {
        tires_per_km: 0.38,
        brakes_per_km: 0.2,
    },
    risk_items: &[
        RiskItem::above_mileage("Water pump / thermostat (reserve)", 90000.0, 700.0, 1500.0),
        RiskItem::above_mileage("Oil leaks / seals", 120000.0, 600.0, 1400.0),
    ],
};

static G20_330E: VehicleProfile = VehicleProfile {
    display_name: "BMW 3 Series G20 330e (PHEV)",
    notes: "Fuel cost can be low when charged often; reserve for hybrid system and battery with age.",
    defaults: ProfileDefaults {
        km_per_liter: 14.0,
        depreciation_rate_per_year: 13.0,
        base_service_per_year: 22000.0,
    },
    wear_items: WearItems {
        tires_per_km: 0.4,
        brakes_per_km: 0.16,
    },
    risk_items: &[
        RiskItem {
            name: "Battery / hybrid system (reserve)",
            min_mileage_km: None,
            max_mileage_km: None,
            min_year: None,
            max_year: Some(2019),
            monthly_reserve_min: 900.0,
            monthly_reserve_max: 2000.0,
        },
        RiskItem::above_mileage("Suspension", 100000.0, 800.0, 1500.0),
    ],
};

static F10_520D: VehicleProfile = VehicleProfile {
    display_name: "BMW 5 Series F10 520d (Diesel)",
    notes: "Larger body with slightly higher fixed costs; reserve for suspension and cooling.",
    defaults: ProfileDefaults {
        km_per_liter: 13.5,
        depreciation_rate_per_year: 11.0,
        base_service_per_year: 22000.0,
    },
    wear_items: WearItems {
        tires_per_km: 0.45,
        brakes_per_km: 0.24,
    },
    risk_items: &[
        RiskItem::above_mileage("Suspension (vehicle weight)", 90000.0, 1000.0, 2000.0),
        RiskItem::above_mileage("Cooling system / water pump (reserve)", 120000.0, 800.0, 1600.0),
    ],
};

static F48_X1_20D: VehicleProfile = VehicleProfile {
    display_name: "BMW X1 F48 20d (Diesel)",
    notes: "Small SUV with decent economy; tyres and suspension average a little higher.",
    defaults: ProfileDefaults {
        km_per_liter: 14.0,
        depreciation_rate_per_year: 12.0,
        base_service_per_year: 20000.0,
    },
    wear_items: WearItems {
        tires_per_km: 0.42,
        brakes_per_km: 0.22,
    },
    risk_items: &[RiskItem::above_mileage("Suspension / bushings", 90000.0, 900.0, 1600.0)],
};

static G01_X3_20D: VehicleProfile = VehicleProfile {
    display_name: "BMW X3 G01 20d (Diesel)",
    notes: "Higher fixed costs (tyres, brakes, insurance); diesel pays off at high mileage.",
    defaults: ProfileDefaults {
        km_per_liter: 13.0,
        depreciation_rate_per_year: 12.0,
        base_service_per_year: 24000.0,
    },
    wear_items: WearItems {
        tires_per_km: 0.55,
        brakes_per_km: 0.3,
    },
    risk_items: &[
        RiskItem::above_mileage("Suspension", 80000.0, 1100.0, 2200.0),
        RiskItem::above_mileage("Cooling system (reserve)", 120000.0, 900.0, 1800.0),
    ],
};
