#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use appointment_cell::{
    Appointment, AppointmentState, AppointmentsRepository, CreateAppointmentData,
    InMemoryAppointmentsRepository,
};
use notification_cell::{
    CreateNotificationData, InMemoryNotificationsRepository, Notification, NotificationsRepository,
};
use shared_cache::{CacheError, CacheProvider, InMemoryCacheProvider};
use shared_config::{AppConfig, ScheduleConfig};
use shared_database::RepositoryError;
use shared_utils::clock::FixedClock;
use shared_utils::test_utils::TestConfig;

pub fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

/// Default "now" for tests: well before the 2030-05-10 booking scenarios.
pub const NOW: &str = "2030-05-01T12:30:00Z";

/// In-memory appointments that count calls and can hide rows from lookups.
#[derive(Default)]
pub struct RecordingAppointmentsRepository {
    pub inner: InMemoryAppointmentsRepository,
    pub find_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    /// When set, `find_by_date` never sees existing rows (a concurrent booking).
    pub hide_existing: AtomicBool,
}

impl RecordingAppointmentsRepository {
    pub fn finds(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub async fn seed(&self, provider_id: &str, user_id: &str, date: &str) -> Appointment {
        self.inner
            .create(CreateAppointmentData {
                provider_id: provider_id.to_string(),
                user_id: user_id.to_string(),
                date: at(date),
            })
            .await
            .unwrap()
    }
}

#[async_trait]
impl AppointmentsRepository for RecordingAppointmentsRepository {
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>, RepositoryError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.hide_existing.load(Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_by_date(date, provider_id).await
    }

    async fn find_all_from_provider_between(
        &self,
        provider_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all_from_provider_between(provider_id, start, end).await
    }

    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment, RepositoryError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create(data).await
    }
}

/// In-memory cache that records invalidations and can be told to fail.
#[derive(Default)]
pub struct RecordingCache {
    pub inner: InMemoryCacheProvider,
    pub invalidated: Mutex<Vec<String>>,
    pub fail_invalidate: AtomicBool,
}

impl RecordingCache {
    pub fn invalidated_keys(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }
}

#[async_trait]
impl CacheProvider for RecordingCache {
    async fn save(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.inner.save(key, value).await
    }

    async fn recover(&self, key: &str) -> Result<Option<Value>, CacheError> {
        self.inner.recover(key).await
    }

    async fn invalidate(&self, key: &str) -> Result<(), CacheError> {
        if self.fail_invalidate.load(Ordering::SeqCst) {
            return Err(CacheError::PoolError("cache unavailable".to_string()));
        }
        self.invalidated.lock().unwrap().push(key.to_string());
        self.inner.invalidate(key).await
    }

    async fn invalidate_prefix(&self, prefix: &str) -> Result<(), CacheError> {
        self.inner.invalidate_prefix(prefix).await
    }
}

pub struct FailingNotificationsRepository;

#[async_trait]
impl NotificationsRepository for FailingNotificationsRepository {
    async fn create(&self, _data: CreateNotificationData) -> Result<Notification, RepositoryError> {
        Err(RepositoryError::Backend("notifications store is down".to_string()))
    }
}

pub struct Harness {
    pub state: AppointmentState,
    pub appointments: Arc<RecordingAppointmentsRepository>,
    pub notifications: Arc<InMemoryNotificationsRepository>,
    pub cache: Arc<RecordingCache>,
}

impl Harness {
    pub fn new(now: &str) -> Self {
        Self::with_config(TestConfig::default().to_app_config(), now)
    }

    pub fn with_schedule(schedule: ScheduleConfig, now: &str) -> Self {
        let config = AppConfig {
            schedule,
            ..TestConfig::default().to_app_config()
        };
        Self::with_config(config, now)
    }

    pub fn with_config(config: AppConfig, now: &str) -> Self {
        let appointments = Arc::new(RecordingAppointmentsRepository::default());
        let notifications = Arc::new(InMemoryNotificationsRepository::new());
        let cache = Arc::new(RecordingCache::default());

        let state = AppointmentState::new(
            Arc::new(config),
            appointments.clone(),
            notifications.clone(),
            cache.clone(),
        )
        .with_clock(Arc::new(FixedClock(at(now))));

        Self {
            state,
            appointments,
            notifications,
            cache,
        }
    }

    /// Same collaborators, but notifications always fail.
    pub fn with_failing_notifications(mut self) -> Self {
        self.state.notifications = Arc::new(FailingNotificationsRepository);
        self
    }
}
