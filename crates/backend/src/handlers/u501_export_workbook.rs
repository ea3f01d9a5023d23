use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::routes::AppState;
use crate::shared::error::SheetsError;
use crate::usecases::u501_export_workbook;

/// GET / и GET /api/sheets
///
/// Reads a fresh snapshot of the workbook on every request.
pub async fn export_workbook(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, SheetsError> {
    let result = u501_export_workbook::aggregate(state.source.as_ref(), &state.options)
        .await
        .map_err(|e| {
            tracing::error!("Workbook export failed: {}", e);
            e
        })?;

    let body = u501_export_workbook::serialize(&result)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}
