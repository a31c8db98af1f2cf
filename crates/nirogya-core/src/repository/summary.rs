//! SummaryRepository trait definition.
//!
//! The persistence gateway for analysis records. The workflow treats every
//! call as advisory: failures are logged and downgraded, never escalated.

use nirogya_types::error::RepositoryError;
use nirogya_types::report::{RecentReport, ReportSummary};
use uuid::Uuid;

/// Repository trait for report summary (analysis record) persistence.
///
/// Implementations live in nirogya-infra (e.g., `SqliteSummaryRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SummaryRepository: Send + Sync {
    /// Insert a new record with status `processing` and return it.
    fn create_processing(
        &self,
        report_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<ReportSummary, RepositoryError>> + Send;

    /// Finalize a record as `completed` with the generated summary text.
    fn mark_completed(
        &self,
        id: &Uuid,
        summary_text: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Finalize a record as `failed` with the error message.
    fn mark_failed(
        &self,
        id: &Uuid,
        error_message: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Most recent uploads with their latest summary, newest first.
    ///
    /// Used by the chat assistant to build user context.
    fn recent_reports(
        &self,
        user_id: &str,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<RecentReport>, RepositoryError>> + Send;
}
