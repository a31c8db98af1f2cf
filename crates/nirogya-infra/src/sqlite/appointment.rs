//! SQLite appointment repository implementation.

use chrono::{NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;

use nirogya_core::repository::AppointmentRepository;
use nirogya_types::appointment::{Appointment, NewAppointment};
use nirogya_types::error::RepositoryError;

use super::map_sqlx;
use super::pool::DatabasePool;
use super::summary::parse_datetime;

/// SQLite-backed implementation of `AppointmentRepository`.
pub struct SqliteAppointmentRepository {
    pool: DatabasePool,
}

impl SqliteAppointmentRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, query: &str, user_id: &str, limit: Option<i64>) -> Result<Vec<Appointment>, RepositoryError> {
        let mut q = sqlx::query(query).bind(user_id);
        if let Some(limit) = limit {
            q = q.bind(limit);
        }
        let rows = q.fetch_all(&self.pool.reader).await.map_err(map_sqlx)?;
        rows.iter()
            .map(|row| AppointmentRow::from_row(row).map_err(map_sqlx)?.into_appointment())
            .collect()
    }
}

/// Internal row type for mapping SQLite rows to domain Appointment.
struct AppointmentRow {
    id: String,
    user_id: String,
    doctor_name: String,
    specialty: String,
    date: String,
    time: String,
    notes: Option<String>,
    created_at: String,
}

impl AppointmentRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            doctor_name: row.try_get("doctor_name")?,
            specialty: row.try_get("specialty")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_appointment(self) -> Result<Appointment, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid appointment id: {e}")))?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| RepositoryError::Query(format!("invalid date '{}': {e}", self.date)))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Appointment {
            id,
            user_id: self.user_id,
            doctor_name: self.doctor_name,
            specialty: self.specialty,
            date,
            time: self.time,
            notes: self.notes,
            created_at,
        })
    }
}

impl AppointmentRepository for SqliteAppointmentRepository {
    async fn create(&self, appointment: &NewAppointment) -> Result<Appointment, RepositoryError> {
        let id = Uuid::now_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO appointments \
             (id, user_id, doctor_name, specialty, date, time, notes, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&appointment.user_id)
        .bind(&appointment.doctor_name)
        .bind(&appointment.specialty)
        .bind(appointment.date.format("%Y-%m-%d").to_string())
        .bind(&appointment.time)
        .bind(&appointment.notes)
        .bind(now.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(map_sqlx)?;

        Ok(Appointment {
            id,
            user_id: appointment.user_id.clone(),
            doctor_name: appointment.doctor_name.clone(),
            specialty: appointment.specialty.clone(),
            date: appointment.date,
            time: appointment.time.clone(),
            notes: appointment.notes.clone(),
            created_at: now,
        })
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Appointment>, RepositoryError> {
        self.fetch(
            "SELECT id, user_id, doctor_name, specialty, date, time, notes, created_at \
             FROM appointments WHERE user_id = ? ORDER BY date ASC",
            user_id,
            None,
        )
        .await
    }

    async fn upcoming(&self, user_id: &str, limit: i64) -> Result<Vec<Appointment>, RepositoryError> {
        self.fetch(
            "SELECT id, user_id, doctor_name, specialty, date, time, notes, created_at \
             FROM appointments WHERE user_id = ? ORDER BY date ASC LIMIT ?",
            user_id,
            Some(limit),
        )
        .await
    }

    async fn delete(&self, id: &Uuid, user_id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> (tempfile::TempDir, DatabasePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("t.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, pool)
    }

    fn booking(user_id: &str, date: (i32, u32, u32)) -> NewAppointment {
        NewAppointment {
            user_id: user_id.to_string(),
            doctor_name: "Dr. Rao".to_string(),
            specialty: "Cardiology".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: "10:30 AM".to_string(),
            notes: Some("bring prior ECG".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_ordered_by_date() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteAppointmentRepository::new(pool);

        repo.create(&booking("u1", (2026, 11, 2))).await.unwrap();
        repo.create(&booking("u1", (2026, 9, 14))).await.unwrap();

        let listed = repo.list("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].date < listed[1].date);
        assert_eq!(listed[0].notes.as_deref(), Some("bring prior ECG"));
    }

    #[tokio::test]
    async fn test_upcoming_respects_limit() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteAppointmentRepository::new(pool);

        for day in 1..=7 {
            repo.create(&booking("u1", (2026, 10, day))).await.unwrap();
        }

        let upcoming = repo.upcoming("u1", 5).await.unwrap();
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].date.to_string(), "2026-10-01");
    }

    #[tokio::test]
    async fn test_delete_scoped_to_owner() {
        let (_dir, pool) = test_pool().await;
        let repo = SqliteAppointmentRepository::new(pool);

        let apt = repo.create(&booking("u1", (2026, 9, 14))).await.unwrap();

        // Another user cannot cancel it.
        let err = repo.delete(&apt.id, "u2").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));

        repo.delete(&apt.id, "u1").await.unwrap();
        assert!(repo.list("u1").await.unwrap().is_empty());
    }
}
