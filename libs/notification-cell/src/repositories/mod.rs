mod in_memory;
mod supabase;

use async_trait::async_trait;
use shared_database::RepositoryError;

use crate::models::{CreateNotificationData, Notification};

pub use in_memory::InMemoryNotificationsRepository;
pub use supabase::SupabaseNotificationsRepository;

#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn create(&self, data: CreateNotificationData) -> Result<Notification, RepositoryError>;
}
