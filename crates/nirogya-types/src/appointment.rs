//! Appointment booking types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booked appointment.
///
/// `time` is a display string as entered in the booking form
/// (e.g. "10:30 AM"); only `date` is used for ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when booking a new appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub user_id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}
