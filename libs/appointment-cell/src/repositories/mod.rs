mod in_memory;
mod supabase;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared_database::RepositoryError;

use crate::models::{Appointment, CreateAppointmentData};

pub use in_memory::InMemoryAppointmentsRepository;
pub use supabase::SupabaseAppointmentsRepository;

#[async_trait]
pub trait AppointmentsRepository: Send + Sync {
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>, RepositoryError>;

    /// Appointments with `start <= date < end`, ordered by date.
    async fn find_all_from_provider_between(
        &self,
        provider_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, RepositoryError>;

    /// Fails with `RepositoryError::Conflict` if the provider already has an appointment at `date`.
    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment, RepositoryError>;
}
