//! Appointment booking endpoints.
//!
//! GET /api/v1/appointments?user_id= - List a user's appointments.
//! POST /api/v1/appointments - Book an appointment.
//! DELETE /api/v1/appointments/{id}?user_id= - Cancel an appointment.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use nirogya_core::repository::AppointmentRepository;
use nirogya_types::appointment::{Appointment, NewAppointment};

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub user_id: String,
}

/// GET /api/v1/appointments - All appointments for a user, soonest first.
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    if query.user_id.is_empty() {
        return Err(AppError::Validation(
            "Missing required parameters".to_string(),
        ));
    }

    let appointments = state.appointments.list(&query.user_id).await?;
    Ok(Json(appointments))
}

/// POST /api/v1/appointments - Book an appointment.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(booking): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    if booking.user_id.is_empty()
        || booking.doctor_name.is_empty()
        || booking.specialty.is_empty()
        || booking.time.is_empty()
    {
        return Err(AppError::Validation(
            "Missing required parameters".to_string(),
        ));
    }

    let appointment = state.appointments.create(&booking).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// DELETE /api/v1/appointments/{id} - Cancel an appointment.
///
/// Scoped to the owner: a mismatched `user_id` behaves like a missing
/// appointment.
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    if query.user_id.is_empty() {
        return Err(AppError::Validation(
            "Missing required parameters".to_string(),
        ));
    }

    state.appointments.delete(&id, &query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
