use axum::{extract::Path, Json};
use serde::Serialize;

use crate::{
    error::AppError,
    profiles::{self, VehicleModel, VehicleProfile},
};

/// A profile together with its wire key
#[derive(Debug, Serialize)]
pub struct ProfileEntry {
    pub key: VehicleModel,
    #[serde(flatten)]
    pub profile: &'static VehicleProfile,
}

impl From<VehicleModel> for ProfileEntry {
    fn from(model: VehicleModel) -> Self {
        Self {
            key: model,
            profile: profiles::lookup(model),
        }
    }
}

/// Handle GET /api/profiles
pub async fn list_profiles() -> Json<Vec<ProfileEntry>> {
    Json(VehicleModel::ALL.iter().copied().map(ProfileEntry::from).collect())
}

/// Handle GET /api/profiles/:key
pub async fn get_profile(Path(key): Path<String>) -> Result<Json<ProfileEntry>, AppError> {
    let model: VehicleModel = key.parse()?;
    Ok(Json(ProfileEntry::from(model)))
}
