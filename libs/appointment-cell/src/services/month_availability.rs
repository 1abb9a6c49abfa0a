use std::sync::Arc;

use chrono::{Datelike, Duration};
use tracing::debug;

use shared_config::ScheduleConfig;
use shared_utils::clock::Clock;

use crate::models::{AppointmentError, MonthAvailabilityItem, MonthQuery};
use crate::repositories::AppointmentsRepository;
use crate::services::calendar;
use crate::state::AppointmentState;

pub struct ListProviderMonthAvailabilityService {
    appointments: Arc<dyn AppointmentsRepository>,
    clock: Arc<dyn Clock>,
    schedule: ScheduleConfig,
}

impl ListProviderMonthAvailabilityService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            appointments: Arc::clone(&state.appointments),
            clock: Arc::clone(&state.clock),
            schedule: state.schedule().clone(),
        }
    }

    /// A day is available while its last second is ahead of now and it still
    /// has fewer appointments than bookable hours.
    pub async fn execute(
        &self,
        provider_id: &str,
        query: MonthQuery,
    ) -> Result<Vec<MonthAvailabilityItem>, AppointmentError> {
        let offset = self.schedule.utc_offset;
        let (month_start, month_end) = calendar::month_bounds(query.year, query.month, offset)?;

        let appointments = self.appointments
            .find_all_from_provider_between(provider_id, month_start, month_end)
            .await
            .map_err(AppointmentError::Repository)?;
        debug!("Provider {} has {} appointments in {}-{}",
               provider_id, appointments.len(), query.year, query.month);

        let now = self.clock.now();
        let days_in_month = (month_end - month_start).num_days() as u32;
        let slots_per_day = self.schedule.slots_per_day();

        let mut per_day = vec![0usize; days_in_month as usize];
        for appointment in &appointments {
            let day = appointment.date.with_timezone(&offset).day() as usize;
            if let Some(count) = per_day.get_mut(day - 1) {
                *count += 1;
            }
        }

        let availability = (1..=days_in_month)
            .map(|day| {
                let end_of_day = month_start + Duration::days(day as i64) - Duration::seconds(1);

                MonthAvailabilityItem {
                    day,
                    available: end_of_day > now && per_day[(day - 1) as usize] < slots_per_day,
                }
            })
            .collect();

        Ok(availability)
    }
}
