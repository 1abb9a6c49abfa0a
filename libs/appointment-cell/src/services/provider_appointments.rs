use std::sync::Arc;

use tracing::{debug, warn};

use shared_cache::{CacheProvider, CacheProviderExt};
use shared_config::ScheduleConfig;

use crate::models::{Appointment, AppointmentError, DayQuery};
use crate::repositories::AppointmentsRepository;
use crate::services::calendar;
use crate::state::AppointmentState;

/// A provider's own agenda for one day, read through the cache.
pub struct ListProviderAppointmentsService {
    appointments: Arc<dyn AppointmentsRepository>,
    cache: Arc<dyn CacheProvider>,
    schedule: ScheduleConfig,
}

impl ListProviderAppointmentsService {
    pub fn new(state: &AppointmentState) -> Self {
        Self {
            appointments: Arc::clone(&state.appointments),
            cache: Arc::clone(&state.cache),
            schedule: state.schedule().clone(),
        }
    }

    pub async fn execute(
        &self,
        provider_id: &str,
        query: DayQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let (day_start, day_end) =
            calendar::day_bounds(query.year, query.month, query.day, self.schedule.utc_offset)?;
        let cache_key = calendar::day_cache_key(provider_id, query.year, query.month, query.day);

        match self.cache.recover_json::<Vec<Appointment>>(&cache_key).await {
            Ok(Some(cached)) => {
                debug!("Cache hit for {}", cache_key);
                return Ok(cached);
            }
            Ok(None) => debug!("Cache miss for {}", cache_key),
            Err(e) => warn!("Ignoring unreadable cache entry {}: {}", cache_key, e),
        }

        let appointments = self.appointments
            .find_all_from_provider_between(provider_id, day_start, day_end)
            .await
            .map_err(AppointmentError::Repository)?;

        if let Err(e) = self.cache.save_json(&cache_key, &appointments).await {
            warn!("Could not cache {}: {}", cache_key, e);
        }

        Ok(appointments)
    }
}
