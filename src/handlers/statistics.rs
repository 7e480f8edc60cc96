use axum::{extract::State, response::IntoResponse, Json};

use crate::domain::Statistics;
use crate::error::AppError;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/statistics",
    responses((status = 200, description = "Statistics over the last 60 seconds", body = Statistics)),
    tag = "Statistics"
)]
pub async fn recent_statistics(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = state.statistics.recent_statistics().await?;
    Ok(Json(stats))
}
