use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{RepositoryError, SupabaseClient};

use super::NotificationsRepository;
use crate::models::{CreateNotificationData, Notification};

/// Notifications stored in the `notifications` table through PostgREST.
pub struct SupabaseNotificationsRepository {
    supabase: SupabaseClient,
}

impl SupabaseNotificationsRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl NotificationsRepository for SupabaseNotificationsRepository {
    async fn create(&self, data: CreateNotificationData) -> Result<Notification, RepositoryError> {
        debug!("Creating notification for recipient {}", data.recipient_id);

        let result: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            "/rest/v1/notifications",
            None,
            Some(json!({
                "recipient_id": data.recipient_id,
                "content": data.content,
                "read": false
            })),
            Some(SupabaseClient::return_representation()),
        ).await?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::Backend("Failed to create notification".to_string()))?;

        Ok(serde_json::from_value(row)?)
    }
}
