use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_database::RepositoryError;

use super::AppointmentsRepository;
use crate::models::{Appointment, CreateAppointmentData};

#[derive(Debug, Default)]
pub struct InMemoryAppointmentsRepository {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }
}

#[async_trait]
impl AppointmentsRepository for InMemoryAppointmentsRepository {
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>, RepositoryError> {
        Ok(self
            .appointments
            .read()
            .await
            .iter()
            .find(|appointment| appointment.provider_id == provider_id && appointment.date == date)
            .cloned())
    }

    async fn find_all_from_provider_between(
        &self,
        provider_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let mut found: Vec<Appointment> = self
            .appointments
            .read()
            .await
            .iter()
            .filter(|appointment| {
                appointment.provider_id == provider_id && appointment.date >= start && appointment.date < end
            })
            .cloned()
            .collect();

        found.sort_by_key(|appointment| appointment.date);
        Ok(found)
    }

    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment, RepositoryError> {
        let mut appointments = self.appointments.write().await;

        // (provider_id, date) uniqueness is checked under the write lock.
        if appointments
            .iter()
            .any(|existing| existing.provider_id == data.provider_id && existing.date == data.date)
        {
            return Err(RepositoryError::Conflict(format!(
                "provider {} already booked at {}",
                data.provider_id, data.date
            )));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            provider_id: data.provider_id,
            user_id: data.user_id,
            date: data.date,
            created_at: now,
            updated_at: now,
        };

        appointments.push(appointment.clone());
        Ok(appointment)
    }
}
