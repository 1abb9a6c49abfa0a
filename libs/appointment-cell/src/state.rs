use std::sync::Arc;

use shared_cache::{CacheProvider, InMemoryCacheProvider};
use shared_config::{AppConfig, ScheduleConfig};
use shared_utils::clock::{Clock, SystemClock};
use notification_cell::{InMemoryNotificationsRepository, NotificationsRepository};

use crate::repositories::{AppointmentsRepository, InMemoryAppointmentsRepository};

/// Collaborators shared by the appointment handlers and services.
#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub appointments: Arc<dyn AppointmentsRepository>,
    pub notifications: Arc<dyn NotificationsRepository>,
    pub cache: Arc<dyn CacheProvider>,
    pub clock: Arc<dyn Clock>,
}

impl AppointmentState {
    pub fn new(
        config: Arc<AppConfig>,
        appointments: Arc<dyn AppointmentsRepository>,
        notifications: Arc<dyn NotificationsRepository>,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self {
            config,
            appointments,
            notifications,
            cache,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn in_memory(config: Arc<AppConfig>) -> Self {
        Self::new(
            config,
            Arc::new(InMemoryAppointmentsRepository::new()),
            Arc::new(InMemoryNotificationsRepository::new()),
            Arc::new(InMemoryCacheProvider::new()),
        )
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn schedule(&self) -> &ScheduleConfig {
        &self.config.schedule
    }
}
