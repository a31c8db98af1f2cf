//! SQLite file metadata repository implementation.

use sqlx::Row;
use uuid::Uuid;

use nirogya_core::repository::FileRepository;
use nirogya_types::error::RepositoryError;
use nirogya_types::file::FileRecord;
use nirogya_types::report::{ProcessingStatus, ReportOverview};

use super::map_sqlx;
use super::pool::DatabasePool;
use super::summary::parse_datetime;

/// SQLite-backed implementation of `FileRepository`.
pub struct SqliteFileRepository {
    pool: DatabasePool,
}

impl SqliteFileRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain ReportOverview.
struct OverviewRow {
    id: String,
    file_name: String,
    file_path: String,
    uploaded_at: String,
    processing_status: Option<String>,
    summary_text: Option<String>,
}

impl OverviewRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            file_name: row.try_get("file_name")?,
            file_path: row.try_get("file_path")?,
            uploaded_at: row.try_get("uploaded_at")?,
            processing_status: row.try_get("processing_status")?,
            summary_text: row.try_get("summary_text")?,
        })
    }

    fn into_overview(self) -> Result<ReportOverview, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid file id: {e}")))?;
        let uploaded_at = parse_datetime(&self.uploaded_at)?;
        let processing_status = self
            .processing_status
            .as_deref()
            .map(str::parse::<ProcessingStatus>)
            .transpose()
            .map_err(RepositoryError::Query)?;

        Ok(ReportOverview {
            id,
            file_name: self.file_name,
            file_path: self.file_path,
            uploaded_at,
            processing_status,
            summary_text: self.summary_text,
        })
    }
}

impl FileRepository for SqliteFileRepository {
    async fn insert(&self, file: &FileRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO files (id, user_id, file_name, file_path, file_type, uploaded_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(file.id.to_string())
        .bind(&file.user_id)
        .bind(&file.file_name)
        .bind(&file.file_path)
        .bind(&file.file_type)
        .bind(file.uploaded_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list_with_summaries(
        &self,
        user_id: &str,
    ) -> Result<Vec<ReportOverview>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT f.id, f.file_name, f.file_path, f.uploaded_at, \
                    rs.processing_status, rs.summary_text \
             FROM files f \
             LEFT JOIN report_summaries rs ON rs.id = ( \
                 SELECT id FROM report_summaries \
                 WHERE report_id = f.id \
                 ORDER BY created_at DESC LIMIT 1) \
             WHERE f.user_id = ? \
             ORDER BY f.uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx)?;

        rows.iter()
            .map(|row| OverviewRow::from_row(row).map_err(map_sqlx)?.into_overview())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("t.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    fn record(user_id: &str, file_name: &str) -> FileRecord {
        FileRecord {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            file_name: file_name.to_string(),
            file_path: format!("{user_id}/{file_name}"),
            file_type: Some("image/png".to_string()),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteFileRepository::new(pool);

        repo.insert(&record("u1", "a.png")).await.unwrap();
        repo.insert(&record("u1", "b.png")).await.unwrap();
        repo.insert(&record("u2", "c.png")).await.unwrap();

        let listed = repo.list_with_summaries("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        // No analysis yet: status column is NULL
        assert!(listed.iter().all(|o| o.processing_status.is_none()));
    }

    #[tokio::test]
    async fn test_list_includes_latest_summary() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteFileRepository::new(pool.clone());
        let file = record("u1", "scan.png");
        repo.insert(&file).await.unwrap();

        use crate::sqlite::summary::SqliteSummaryRepository;
        use nirogya_core::repository::SummaryRepository;
        let summaries = SqliteSummaryRepository::new(pool);
        let attempt = summaries
            .create_processing(&file.id.to_string(), "u1")
            .await
            .unwrap();
        summaries.mark_completed(&attempt.id, "Summary X").await.unwrap();

        let listed = repo.list_with_summaries("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].processing_status,
            Some(ProcessingStatus::Completed)
        );
        assert_eq!(listed[0].summary_text.as_deref(), Some("Summary X"));
    }
}
