//! Report summary types: the analysis record and its status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of one analysis attempt.
///
/// A record is created as `Processing` when the workflow starts and
/// transitions exactly once to `Completed` or `Failed` when it ends.
/// `Pending` is the default for a report with no attempt yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStatus::Pending => write!(f, "pending"),
            ProcessingStatus::Processing => write!(f, "processing"),
            ProcessingStatus::Completed => write!(f, "completed"),
            ProcessingStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ProcessingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ProcessingStatus::Pending),
            "processing" => Ok(ProcessingStatus::Processing),
            "completed" => Ok(ProcessingStatus::Completed),
            "failed" => Ok(ProcessingStatus::Failed),
            other => Err(format!("invalid processing status: '{other}'")),
        }
    }
}

/// One analysis attempt against an uploaded report.
///
/// `report_id` and `user_id` are opaque references owned by the upload
/// flow and the auth provider respectively; no format is assumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: Uuid,
    pub report_id: String,
    pub user_id: String,
    pub summary_text: Option<String>,
    pub processing_status: ProcessingStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recent uploaded file with its latest summary, used for chat context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentReport {
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub processing_status: Option<ProcessingStatus>,
    pub summary_text: Option<String>,
}

/// Dashboard row: an uploaded file joined with its latest analysis state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOverview {
    pub id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
    pub processing_status: Option<ProcessingStatus>,
    pub summary_text: Option<String>,
}
