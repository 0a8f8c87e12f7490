use axum::{extract::rejection::JsonRejection, Json};

use super::json_body;
use crate::{
    calculator::{calculate, CalcInput, CalcResult},
    error::AppError,
    metrics,
};

/// Handle POST /api/calculate
///
/// The engine is total, so only a malformed body can fail here.
pub async fn handle_calculate(
    body: Result<Json<CalcInput>, JsonRejection>,
) -> Result<Json<CalcResult>, AppError> {
    let input = json_body(body)?;
    let result = calculate(&input);

    metrics::record_calculation(result.affordability.level);
    tracing::debug!(
        model = %input.car.model_key,
        total_per_month = result.total_per_month,
        ratio = result.affordability.ratio_to_monthly_income,
        level = %result.affordability.level,
        risks = result.maintenance.risk_items.len(),
        "Calculated ownership cost"
    );

    Ok(Json(result))
}
