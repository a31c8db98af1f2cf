//! SQLite summary repository implementation.
//!
//! Implements `SummaryRepository` from `nirogya-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, RFC 3339 timestamps.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use nirogya_core::repository::SummaryRepository;
use nirogya_types::error::RepositoryError;
use nirogya_types::report::{ProcessingStatus, RecentReport, ReportSummary};

use super::map_sqlx;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `SummaryRepository`.
pub struct SqliteSummaryRepository {
    pool: DatabasePool,
}

impl SqliteSummaryRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain RecentReport.
struct RecentReportRow {
    file_name: String,
    uploaded_at: String,
    processing_status: Option<String>,
    summary_text: Option<String>,
}

impl RecentReportRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            file_name: row.try_get("file_name")?,
            uploaded_at: row.try_get("uploaded_at")?,
            processing_status: row.try_get("processing_status")?,
            summary_text: row.try_get("summary_text")?,
        })
    }

    fn into_report(self) -> Result<RecentReport, RepositoryError> {
        let uploaded_at = parse_datetime(&self.uploaded_at)?;
        let processing_status = self
            .processing_status
            .as_deref()
            .map(str::parse::<ProcessingStatus>)
            .transpose()
            .map_err(RepositoryError::Query)?;

        Ok(RecentReport {
            file_name: self.file_name,
            uploaded_at,
            processing_status,
            summary_text: self.summary_text,
        })
    }
}

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid timestamp '{s}': {e}")))
}

impl SummaryRepository for SqliteSummaryRepository {
    async fn create_processing(
        &self,
        report_id: &str,
        user_id: &str,
    ) -> Result<ReportSummary, RepositoryError> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO report_summaries \
             (id, report_id, user_id, processing_status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(report_id)
        .bind(user_id)
        .bind(ProcessingStatus::Processing.to_string())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        Ok(ReportSummary {
            id,
            report_id: report_id.to_string(),
            user_id: user_id.to_string(),
            summary_text: None,
            processing_status: ProcessingStatus::Processing,
            error_message: None,
            created_at: now,
            updated_at: now,
        })
    }

    async fn mark_completed(&self, id: &Uuid, summary_text: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE report_summaries \
             SET summary_text = ?, processing_status = ?, error_message = NULL, updated_at = ? \
             WHERE id = ?",
        )
        .bind(summary_text)
        .bind(ProcessingStatus::Completed.to_string())
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn mark_failed(&self, id: &Uuid, error_message: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE report_summaries \
             SET processing_status = ?, error_message = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(ProcessingStatus::Failed.to_string())
        .bind(error_message)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn recent_reports(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<RecentReport>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT f.file_name, f.uploaded_at, rs.processing_status, rs.summary_text \
             FROM files f \
             LEFT JOIN report_summaries rs ON rs.id = ( \
                 SELECT id FROM report_summaries \
                 WHERE report_id = f.id \
                 ORDER BY created_at DESC LIMIT 1) \
             WHERE f.user_id = ? \
             ORDER BY f.uploaded_at DESC \
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_sqlx)?;

        rows.iter()
            .map(|row| RecentReportRow::from_row(row).map_err(map_sqlx)?.into_report())
            .collect()
    }
}
