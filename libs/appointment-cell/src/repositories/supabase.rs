use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{RepositoryError, SupabaseClient};

use super::AppointmentsRepository;
use crate::models::{Appointment, CreateAppointmentData};

/// Appointments in the `appointments` table. A unique index on `(provider_id, date)` backs the create conflict.
pub struct SupabaseAppointmentsRepository {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentsRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    fn rows_to_appointments(rows: Vec<Value>) -> Result<Vec<Appointment>, RepositoryError> {
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(RepositoryError::from))
            .collect()
    }
}

fn timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl AppointmentsRepository for SupabaseAppointmentsRepository {
    async fn find_by_date(
        &self,
        date: DateTime<Utc>,
        provider_id: &str,
    ) -> Result<Option<Appointment>, RepositoryError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&date=eq.{}&limit=1",
            urlencoding::encode(provider_id),
            timestamp(date)
        );

        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;
        Ok(Self::rows_to_appointments(rows)?.into_iter().next())
    }

    async fn find_all_from_provider_between(
        &self,
        provider_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, RepositoryError> {
        let path = format!(
            "/rest/v1/appointments?provider_id=eq.{}&date=gte.{}&date=lt.{}&order=date.asc",
            urlencoding::encode(provider_id),
            timestamp(start),
            timestamp(end)
        );

        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;
        debug!("Fetched {} appointments for provider {}", rows.len(), provider_id);
        Self::rows_to_appointments(rows)
    }

    async fn create(&self, data: CreateAppointmentData) -> Result<Appointment, RepositoryError> {
        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/appointments",
            None,
            Some(json!({
                "provider_id": data.provider_id,
                "user_id": data.user_id,
                "date": timestamp(data.date)
            })),
            Some(SupabaseClient::return_representation()),
        ).await?;

        Self::rows_to_appointments(result)?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Backend("Failed to create appointment".to_string()))
    }
}
