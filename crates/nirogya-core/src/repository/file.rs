//! FileRepository trait definition.

use nirogya_types::error::RepositoryError;
use nirogya_types::file::FileRecord;
use nirogya_types::report::ReportOverview;

/// Repository trait for uploaded file metadata.
///
/// Implementations live in nirogya-infra (e.g., `SqliteFileRepository`).
pub trait FileRepository: Send + Sync {
    /// Record a newly uploaded file.
    fn insert(
        &self,
        file: &FileRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List a user's files joined with their latest summary, newest first.
    fn list_with_summaries(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ReportOverview>, RepositoryError>> + Send;
}
