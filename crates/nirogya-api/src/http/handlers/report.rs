//! Report listing endpoint.
//!
//! GET /api/v1/reports?user_id= - Files joined with their latest summary.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use nirogya_core::repository::FileRepository;
use nirogya_types::report::ReportOverview;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportsQuery {
    #[serde(default)]
    pub user_id: String,
}

/// GET /api/v1/reports - List a user's uploaded reports with the status and
/// text of each report's latest analysis attempt.
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<Vec<ReportOverview>>, AppError> {
    if query.user_id.is_empty() {
        return Err(AppError::Validation(
            "Missing required parameters".to_string(),
        ));
    }

    let reports = state.files.list_with_summaries(&query.user_id).await?;
    Ok(Json(reports))
}
