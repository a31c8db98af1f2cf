//! Report analysis endpoint.
//!
//! POST /api/v1/analyze - Run the analysis workflow for one uploaded report.

use axum::Json;
use axum::extract::State;
use tracing::Instrument;

use nirogya_core::analysis::workflow::{AnalyzeRequest, AnalyzeResponse};
use nirogya_observe::genai_attrs;

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/v1/analyze - Analyze a previously uploaded report image.
///
/// Returns the summary along with persistence details; validation failures
/// are 400, everything downstream of validation is 500 with the error's
/// message.
pub async fn analyze_report(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let span = tracing::info_span!(
        "summarize_report",
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_SUMMARIZE_REPORT,
        { genai_attrs::GEN_AI_PROVIDER_NAME } = state.provider,
        { genai_attrs::GEN_AI_REQUEST_MODEL } = %state.model,
        report_id = %request.report_id,
    );

    let response = state.workflow.run(request).instrument(span).await?;
    Ok(Json(response))
}
