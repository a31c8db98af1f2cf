//! AppointmentRepository trait definition.

use nirogya_types::appointment::{Appointment, NewAppointment};
use nirogya_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for appointment bookings.
///
/// Implementations live in nirogya-infra (e.g., `SqliteAppointmentRepository`).
pub trait AppointmentRepository: Send + Sync {
    /// Book a new appointment and return the stored row.
    fn create(
        &self,
        appointment: &NewAppointment,
    ) -> impl std::future::Future<Output = Result<Appointment, RepositoryError>> + Send;

    /// All appointments for a user, soonest first.
    fn list(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, RepositoryError>> + Send;

    /// Up to `limit` soonest appointments for a user.
    ///
    /// Used by the chat assistant to build user context.
    fn upcoming(
        &self,
        user_id: &str,
        limit: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, RepositoryError>> + Send;

    /// Cancel an appointment owned by `user_id`.
    ///
    /// Returns `RepositoryError::NotFound` if no matching row exists.
    fn delete(
        &self,
        id: &Uuid,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
