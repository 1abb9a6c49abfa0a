// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_cache::CacheError;
use shared_database::RepositoryError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub provider_id: String,
    pub user_id: String,
    /// Always the start of an hour.
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAppointmentData {
    pub provider_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Body of `POST /appointments`. `date` is RFC 3339, or a bare local datetime in the schedule timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub provider_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayQuery {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthQuery {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailabilityItem {
    pub hour: u32,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthAvailabilityItem {
    pub day: u32,
    pub available: bool,
}

// ==============================================================================
// ERROR MODELS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("You can`t create an appointment on a past date")]
    PastDate,

    #[error("You can`t create an appointment with yourself")]
    SelfBooking,

    #[error("You can only create appointments between {start_hour}:00 and {end_hour}:00")]
    OutsideBusinessHours { start_hour: u32, end_hour: u32 },

    #[error("This appointment is already booked")]
    SlotTaken,

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Appointment storage error: {0}")]
    Repository(#[source] RepositoryError),

    #[error("Notification could not be created: {0}")]
    Notification(#[source] RepositoryError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl AppointmentError {
    /// Rule violations the caller can fix, as opposed to backend failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppointmentError::PastDate
                | AppointmentError::SelfBooking
                | AppointmentError::OutsideBusinessHours { .. }
                | AppointmentError::SlotTaken
                | AppointmentError::InvalidDate(_)
        )
    }
}
