use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use shared_config::ScheduleConfig;
use shared_utils::clock::Clock;

use crate::models::{AppointmentError, DayAvailabilityItem, DayQuery};
use crate::repositories::AppointmentsRepository;
use crate::services::calendar;
use crate::state::AppointmentState;

pub struct ListProviderDayAvailabilityService {
    appointments: Arc<dyn AppointmentsRepository>,
    clock: Arc<dyn Clock>,
    schedule: ScheduleConfig,
}

impl ListProviderDayAvailabilityService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            appointments: Arc::clone(&state.appointments),
            clock: Arc::clone(&state.clock),
            schedule: state.schedule().clone(),
        }
    }

    /// One entry per bookable hour; an hour is available when it is still
    /// ahead of now and the provider has nothing booked in it.
    pub async fn execute(
        &self,
        provider_id: &str,
        query: DayQuery,
    ) -> Result<Vec<DayAvailabilityItem>, AppointmentError> {
        let offset = self.schedule.utc_offset;
        let (day_start, day_end) = calendar::day_bounds(query.year, query.month, query.day, offset)?;

        let appointments = self.appointments
            .find_all_from_provider_between(provider_id, day_start, day_end)
            .await
            .map_err(AppointmentError::Repository)?;
        debug!("Provider {} has {} appointments on {}-{}-{}",
               provider_id, appointments.len(), query.year, query.month, query.day);

        let now = self.clock.now();

        let availability = self.schedule
            .bookable_hours()
            .map(|hour| {
                let booked = appointments
                    .iter()
                    .any(|appointment| calendar::local_hour(appointment.date, offset) == hour);
                let slot_start = day_start + Duration::hours(hour as i64);

                DayAvailabilityItem {
                    hour,
                    available: !booked && slot_start > now,
                }
            })
            .collect();

        Ok(availability)
    }
}
