use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_database::RepositoryError;

use super::NotificationsRepository;
use crate::models::{CreateNotificationData, Notification};

#[derive(Debug, Default)]
pub struct InMemoryNotificationsRepository {
    notifications: RwLock<Vec<Notification>>,
}

impl InMemoryNotificationsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn create(&self, data: CreateNotificationData) -> Result<Notification, RepositoryError> {
        let now = Utc::now();
        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id: data.recipient_id,
            content: data.content,
            read: false,
            created_at: now,
            updated_at: now,
        };

        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }
}
