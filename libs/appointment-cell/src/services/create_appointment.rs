// libs/appointment-cell/src/services/create_appointment.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use notification_cell::{CreateNotificationData, NotificationsRepository};
use shared_cache::CacheProvider;
use shared_config::ScheduleConfig;
use shared_database::RepositoryError;
use shared_utils::clock::Clock;

use crate::models::{Appointment, AppointmentError, CreateAppointmentData};
use crate::repositories::AppointmentsRepository;
use crate::services::calendar;
use crate::state::AppointmentState;

#[derive(Debug, Clone)]
pub struct CreateAppointmentInput {
    pub provider_id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
}

pub struct CreateAppointmentService {
    appointments: Arc<dyn AppointmentsRepository>,
    notifications: Arc<dyn NotificationsRepository>,
    cache: Arc<dyn CacheProvider>,
    clock: Arc<dyn Clock>,
    schedule: ScheduleConfig,
}

impl CreateAppointmentService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            appointments: Arc::clone(&state.appointments),
            notifications: Arc::clone(&state.notifications),
            cache: Arc::clone(&state.cache),
            clock: Arc::clone(&state.clock),
            schedule: state.schedule().clone(),
        }
    }

    /// Books `date` (truncated to its hour) with the provider, then notifies the
    /// provider and drops the cached appointment list for that day.
    ///
    /// Rule violations are reported in this order: past date, self booking,
    /// outside business hours, slot already taken. Nothing is rolled back if
    /// the notification or the cache invalidation fails after the insert.
    pub async fn execute(&self, input: CreateAppointmentInput) -> Result<Appointment, AppointmentError> {
        let CreateAppointmentInput { provider_id, user_id, date } = input;
        let offset = self.schedule.utc_offset;

        let appointment_date = calendar::start_of_hour(date, offset);
        info!("Creating appointment for user {} with provider {} at {}", user_id, provider_id, appointment_date);

        if appointment_date <= self.clock.now() {
            warn!("Rejected appointment at {}: date is in the past", appointment_date);
            return Err(AppointmentError::PastDate);
        }

        if user_id == provider_id {
            warn!("Rejected appointment for {}: self booking", user_id);
            return Err(AppointmentError::SelfBooking);
        }

        let hour = calendar::local_hour(appointment_date, offset);
        if !self.schedule.is_bookable_hour(hour) {
            warn!("Rejected appointment at hour {}: outside business hours", hour);
            return Err(AppointmentError::OutsideBusinessHours {
                start_hour: self.schedule.business_hours_start,
                end_hour: self.schedule.business_hours_end,
            });
        }

        let existing = self.appointments
            .find_by_date(appointment_date, &provider_id)
            .await
            .map_err(AppointmentError::Repository)?;

        if existing.is_some() {
            warn!("Provider {} already booked at {}", provider_id, appointment_date);
            return Err(AppointmentError::SlotTaken);
        }

        let appointment = self.appointments
            .create(CreateAppointmentData {
                provider_id: provider_id.clone(),
                user_id,
                date: appointment_date,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AppointmentError::SlotTaken,
                other => AppointmentError::Repository(other),
            })?;

        let content = format!(
            "Novo agendamento para dia {}",
            calendar::format_notification_date(appointment_date, offset)
        );

        self.notifications
            .create(CreateNotificationData {
                recipient_id: provider_id.clone(),
                content,
            })
            .await
            .map_err(|e| {
                error!("Appointment {} persisted but notification failed: {}", appointment.id, e);
                AppointmentError::Notification(e)
            })?;

        let cache_key = calendar::appointment_cache_key(&provider_id, appointment_date, offset);
        self.cache.invalidate(&cache_key).await.map_err(|e| {
            error!("Appointment {} persisted but cache key {} was not invalidated: {}", appointment.id, cache_key, e);
            AppointmentError::from(e)
        })?;
        debug!("Invalidated cache key {}", cache_key);

        info!("Appointment {} created for provider {}", appointment.id, provider_id);
        Ok(appointment)
    }
}
