//! Reservation data endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::reservation::ReservationRecord, AppState};

/// Fetch every reservation record.
///
/// The whole collection is returned; date filtering and aggregation happen on
/// the dashboard side.
#[utoipa::path(
    post,
    path = "/data",
    tag = "reservations",
    responses(
        (status = 200, description = "All reservation records", body = Vec<ReservationRecord>),
        (status = 500, description = "Record store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn fetch_all_reservations(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReservationRecord>>> {
    let records = state.services.reservations.list_all().await?;
    Ok(Json(records))
}
